//! Pipeline orchestration.
//!
//! Strict sequence, no retries: search -> analyze -> PDF -> map -> mail.
//! The first failing stage aborts the run and nothing partial is kept
//! beyond files already written to disk.

use crate::config::Config;
use crate::desktop;
use crate::error::Result;
use crate::gemini::{GeminiClient, GeminiConfig};
use crate::mail::Mailer;
use crate::map::{self, MAP_FILE_NAME};
use crate::report;
use crate::search::{TavilyClient, TavilyConfig};
use std::path::PathBuf;

/// Per-run inputs and the resolved output directory. Runs never share
/// state; a new context is built for every trigger.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub city: String,
    pub destination_email: String,
    pub output_dir: PathBuf,
}

impl RunContext {
    /// Build a context with the output directory resolved from the
    /// current user's desktop.
    pub fn new(city: impl Into<String>, destination_email: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            destination_email: destination_email.into(),
            output_dir: desktop::output_dir(),
        }
    }

    /// Deterministic report path; reruns for the same city overwrite it.
    pub fn pdf_path(&self) -> PathBuf {
        self.output_dir.join(format!("Reporte_{}.pdf", self.city))
    }

    /// Fixed map path, independent of city.
    pub fn map_path(&self) -> PathBuf {
        self.output_dir.join(MAP_FILE_NAME)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub pdf_path: PathBuf,
    pub map_path: PathBuf,
    pub incident_count: usize,
}

/// The five-stage report pipeline.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run end to end, reporting one human-readable line per stage
    /// through `progress`. API clients are built inside their stage so
    /// that a missing secret fails exactly where it is needed.
    pub async fn run(&self, ctx: &RunContext, progress: &dyn Fn(String)) -> Result<RunOutput> {
        stage(progress, format!("🌍 1. Buscando reportes para {}...", ctx.city));
        let tavily = TavilyClient::new(TavilyConfig::new(self.config.tavily_api_key()?))?;
        let hits = tavily.search(&ctx.city).await?;

        stage(progress, "🧠 2. Analizando con IA (Gemma)...".to_string());
        let gemini = GeminiClient::new(GeminiConfig::new(self.config.gemini_api_key()?))?;
        let report = gemini.analyze(&hits).await?;

        let pdf_path = ctx.pdf_path();
        stage(progress, format!("📄 3. Guardando PDF en: {}", pdf_path.display()));
        report::write_pdf(&pdf_path, &ctx.city, &report)?;

        stage(progress, "🗺️ 4. Generando mapa interactivo...".to_string());
        let map_path = ctx.map_path();
        map::write_map(&map_path, &ctx.city, &report.incidents)?;

        stage(progress, format!("📧 5. Enviando a {}...", ctx.destination_email));
        let mailer = Mailer::new(&self.config)?;
        mailer.send_report(&ctx.destination_email, &ctx.city, &pdf_path).await?;

        Ok(RunOutput { pdf_path, map_path, incident_count: report.incidents.len() })
    }
}

fn stage(progress: &dyn Fn(String), line: String) {
    tracing::info!("{line}");
    progress(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths_are_deterministic() {
        let ctx = RunContext {
            city: "Bogota".into(),
            destination_email: "d@example.com".into(),
            output_dir: PathBuf::from("/tmp/out"),
        };
        assert_eq!(ctx.pdf_path(), PathBuf::from("/tmp/out/Reporte_Bogota.pdf"));
        assert_eq!(ctx.map_path(), PathBuf::from("/tmp/out/mapa_movilidad.html"));
    }
}
