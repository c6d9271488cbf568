//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use dwiz_ops::{CatalogListing, ConnectionSummary, DraftList, OperationResult, SessionSummary};
use dwiz_resolver::{format_mebibytes, MissingReason};
use dwiz_types::{ColorChoice, Component, Flow};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            self.render_json(result)
        } else {
            self.render_table(result)
        }
    }

    /// Render as JSON
    fn render_json(&self, result: &OperationResult) -> io::Result<()> {
        let json = result.to_json().map_err(io::Error::other)?;
        self.term.write_line(&json)
    }

    /// Render as formatted table
    fn render_table(&self, result: &OperationResult) -> io::Result<()> {
        match result {
            OperationResult::Session(summary) => self.render_session(summary),
            OperationResult::Catalog(listing) => self.render_catalog(listing),
            OperationResult::Drafts(drafts) => self.render_drafts(drafts),
            OperationResult::Connection(info) => self.render_connection(info),
            OperationResult::Success(message) => self.render_success_message(message),
        }
    }

    fn render_session(&self, summary: &SessionSummary) -> io::Result<()> {
        let mut table = new_table(&["Component", "Version", "Edition", "Size"]);

        for component in Component::ALL {
            match summary.selection.get(&component) {
                Some(selected) => {
                    let version = match &selected.release {
                        Some(release) => format!("{}-{release}", selected.version),
                        None => selected.version.clone(),
                    };
                    table.add_row(vec![
                        Cell::new(component),
                        Cell::new(version),
                        Cell::new(&selected.edition),
                        Cell::new(format_mebibytes(selected.estimated_size)),
                    ]);
                }
                None if summary.missing.contains(&component) => {
                    table.add_row(vec![
                        Cell::new(component),
                        self.cell_colored("missing", Color::Red),
                        Cell::new("-"),
                        Cell::new("-"),
                    ]);
                }
                None => {}
            }
        }

        self.term.write_line(&table.to_string())?;
        self.term.write_line(&format!(
            "Flow:           {}",
            match summary.flow {
                Flow::FreshInstall => "install",
                Flow::UpgradeOnly => "upgrade",
            }
        ))?;
        self.term.write_line(&format!(
            "Estimated size: {}",
            format_mebibytes(summary.estimated_size_bytes)
        ))?;

        if summary.low_version {
            self.term.write_line(&self.paint(
                Style::new().yellow(),
                "The selected core predates the optional components; \
                 agent and console are unavailable.",
            ))?;
        }

        if summary.ready {
            self.term
                .write_line(&self.paint(Style::new().green().bold(), "Ready to proceed."))?;
            return Ok(());
        }

        let missing: Vec<String> = summary.missing.iter().map(ToString::to_string).collect();
        self.term.write_line(&self.paint(
            Style::new().red().bold(),
            &format!("Not ready: no installable artifact for {}", missing.join(", ")),
        ))?;

        for diagnostic in &summary.diagnostics {
            let advice = match diagnostic.reason {
                MissingReason::NotConfigured => "is not configured; add it to the mirror list",
                MissingReason::Disabled => "is disabled; enable it and refresh",
            };
            self.term
                .write_line(&format!("  • mirror {} {advice}", diagnostic.mirror_name))?;
        }
        Ok(())
    }

    fn render_catalog(&self, listing: &CatalogListing) -> io::Result<()> {
        if listing.components.values().all(Vec::is_empty) {
            return self.term.write_line("No installable artifacts.");
        }

        let mut table = new_table(&["Component", "Version", "Edition", "Size", "Key"]);
        for (component, artifacts) in &listing.components {
            for artifact in artifacts {
                let version = if artifact.selected {
                    self.cell_colored(&format!("{} *", artifact.version), Color::Green)
                } else {
                    Cell::new(&artifact.version)
                };
                table.add_row(vec![
                    Cell::new(component),
                    version,
                    Cell::new(&artifact.edition),
                    Cell::new(format_mebibytes(artifact.estimated_size)),
                    Cell::new(&artifact.key),
                ]);
            }
        }
        self.term.write_line(&table.to_string())
    }

    fn render_drafts(&self, drafts: &DraftList) -> io::Result<()> {
        if drafts.drafts.is_empty() {
            return self.term.write_line("No draft deployments.");
        }

        let mut table = new_table(&["Name", "Status"]);
        for draft in &drafts.drafts {
            table.add_row(vec![Cell::new(&draft.name), Cell::new(&draft.status)]);
        }
        self.term.write_line(&table.to_string())
    }

    fn render_connection(&self, info: &ConnectionSummary) -> io::Result<()> {
        self.term.write_line(&self.paint(Style::new().bold(), &info.cluster_name))?;
        self.term.write_line(&format!("Host:     {}:{}", info.host, info.port))?;
        self.term.write_line(&format!("User:     {}", info.user))?;
        if !info.database.is_empty() {
            self.term.write_line(&format!("Database: {}", info.database))?;
        }
        self.term.write_line(&format!(
            "Password: {}",
            if info.has_password { "set" } else { "empty" }
        ))
    }

    fn render_success_message(&self, message: &str) -> io::Result<()> {
        self.term
            .write_line(&self.paint(Style::new().green(), message))
    }

    fn colors_enabled(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colors_enabled() {
            style.force_styling(true).apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn cell_colored(&self, text: &str, color: Color) -> Cell {
        if self.colors_enabled() {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|header| Cell::new(header).add_attribute(Attribute::Bold)),
        );
    table
}
