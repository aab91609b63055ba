//! Interactive incident map renderer.
//!
//! Emits one self-contained HTML page. All geocoding happens in the
//! browser once the page is opened: the script resolves the city, then
//! walks the incidents strictly in order, pausing 1.5 s before each
//! Nominatim lookup as a rate-limit courtesy to the shared public
//! service. Addresses Nominatim cannot resolve are skipped silently
//! (console only); the main program never learns the outcome.

use crate::error::Result;
use crate::types::Incident;
use std::fs;
use std::path::Path;

/// Fixed file name on the output directory, overwritten per run.
pub const MAP_FILE_NAME: &str = "mapa_movilidad.html";

/// Marker fill for incidents whose severity is exactly `"Alta"`.
pub const ALERT_COLOR: &str = "#ff0000";

/// Marker fill for every other severity.
pub const CAUTION_COLOR: &str = "#ffa500";

/// Pause before each incident geocode, in milliseconds.
pub const GEOCODE_DELAY_MS: u64 = 1500;

const MAP_TEMPLATE: &str = r#"<html><body style="margin:0;"><div id="map" style="height:100vh;"></div>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<script>
    var map = L.map('map').setView([0,0], 2);
    L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png').addTo(map);

    async function init() {
        let rC = await fetch(`https://nominatim.openstreetmap.org/search?format=json&q=__CIUDAD__, Colombia`);
        let dC = await rC.json();
        if(dC.length > 0) map.setView([dC[0].lat, dC[0].lon], 13);

        const items = __INCIDENTES__;
        for(let i of items) {
            await new Promise(r => setTimeout(r, __RETRASO__));

            let query = `${i.direccion}, __CIUDAD__, Colombia`;
            let r = await fetch(`https://nominatim.openstreetmap.org/search?format=json&q=${encodeURIComponent(query)}`);
            let d = await r.json();

            if(d.length > 0) {
                let c = i.gravedad === 'Alta' ? '__COLOR_ALTA__' : '__COLOR_RESTO__';
                L.circleMarker([d[0].lat, d[0].lon], {
                    color: 'white',
                    weight: 2,
                    radius: 12,
                    fillColor: c,
                    fillOpacity: 0.9
                }).addTo(map).bindPopup(`<b>${i.direccion}</b><br>${i.descripcion}`);
            } else {
                console.log("No se encontró:", query);
            }
        }
    }
    init();
</script></body></html>"#;

/// Render the page for `city` and its incidents.
pub fn render(city: &str, incidents: &[Incident]) -> Result<String> {
    let datos = serde_json::to_string(incidents)?;
    Ok(MAP_TEMPLATE
        .replace("__CIUDAD__", city)
        .replace("__INCIDENTES__", &datos)
        .replace("__RETRASO__", &GEOCODE_DELAY_MS.to_string())
        .replace("__COLOR_ALTA__", ALERT_COLOR)
        .replace("__COLOR_RESTO__", CAUTION_COLOR))
}

/// Render and write to `path`, overwriting any previous map.
pub fn write_map(path: &Path, city: &str, incidents: &[Incident]) -> Result<()> {
    fs::write(path, render(city, incidents)?)?;
    Ok(())
}
