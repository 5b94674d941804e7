//! Table rendering for generated recipes

use super::{ColorTheme, StatusIcon};
use crate::domain::recipe::GenerationReport;
use crate::infrastructure::kubernetes::resources::ServiceVisibility;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the recipes produced by one run
    pub fn render_report(&self, report: &GenerationReport) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("EXPOSURE").set_alignment(CellAlignment::Center),
                Cell::new("FILE").set_alignment(CellAlignment::Left),
            ]);

        for artifact in report.artifacts() {
            let exposure = match artifact.visibility {
                Some(visibility) => format!(
                    "{} {}",
                    StatusIcon::get_exposure_icon(visibility == ServiceVisibility::External),
                    visibility
                ),
                None => StatusIcon::SUCCESS.to_string(),
            };

            table.add_row(vec![
                Cell::new(artifact.kind),
                Cell::new(&artifact.name),
                Cell::new(exposure)
                    .fg(self.theme.get_visibility_color(artifact.visibility))
                    .set_alignment(CellAlignment::Center),
                Cell::new(artifact.path.display()),
            ]);
        }

        if report.service.is_none() {
            table.add_row(vec![
                Cell::new("Service").fg(self.theme.muted),
                Cell::new(StatusIcon::SKIPPED).fg(self.theme.muted),
                Cell::new(StatusIcon::SKIPPED)
                    .fg(self.theme.muted)
                    .set_alignment(CellAlignment::Center),
                Cell::new("no exposed ports").fg(self.theme.muted),
            ]);
        }

        let count = report.artifacts().count();
        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Generated Recipes {} ─╮\n",
            format!("[{} files]", count).bright_black()
        ));
        output.push_str(&table.to_string());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::RecipeArtifact;
    use std::path::PathBuf;

    fn deployment() -> RecipeArtifact {
        RecipeArtifact {
            kind: "Deployment",
            name: "deployment-api".to_string(),
            path: PathBuf::from("out/deployment.yml"),
            visibility: None,
        }
    }

    #[test]
    fn test_render_without_service() {
        let report = GenerationReport {
            deployment: deployment(),
            service: None,
        };

        let output = TableRenderer::new().render_report(&report);
        assert!(output.contains("deployment-api"));
        assert!(output.contains("out/deployment.yml"));
        assert!(output.contains("no exposed ports"));
    }

    #[test]
    fn test_render_with_external_service() {
        let report = GenerationReport {
            deployment: deployment(),
            service: Some(RecipeArtifact {
                kind: "Service",
                name: "service-api-external".to_string(),
                path: PathBuf::from("out/external-service.yml"),
                visibility: Some(ServiceVisibility::External),
            }),
        };

        let output = TableRenderer::new().render_report(&report);
        assert!(output.contains("service-api-external"));
        assert!(output.contains("external"));
        assert!(!output.contains("no exposed ports"));
    }
}
