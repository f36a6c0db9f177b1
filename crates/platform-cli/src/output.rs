//! Rendering of list results

use crate::aws::{HostedZoneSummary, InstanceSummary};
use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

/// Output format for list commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(*h)).collect::<Vec<_>>());
    table
}

pub fn render_instances(instances: &[InstanceSummary], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(instances)?);
    }
    if instances.is_empty() {
        return Ok("No managed instances found".to_string());
    }

    let mut table = table(&["Instance ID", "State", "Name"]);
    for instance in instances {
        table.add_row(vec![
            Cell::new(&instance.instance_id),
            Cell::new(&instance.state),
            Cell::new(instance.name.as_deref().unwrap_or("-")),
        ]);
    }
    Ok(table.to_string())
}

pub fn render_zones(zones: &[HostedZoneSummary], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(zones)?);
    }
    if zones.is_empty() {
        return Ok("No managed hosted zones found".to_string());
    }

    let mut table = table(&["Zone", "Zone ID"]);
    for zone in zones {
        table.add_row(vec![Cell::new(&zone.name), Cell::new(zone.id.as_str())]);
    }
    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::ZoneId;
    use crate::testing::owned_instance;

    #[test]
    fn instance_table_lists_id_state_and_name() {
        let mut instance = owned_instance("i-0abc", "running");
        instance.name = Some("web-1".to_string());

        let rendered = render_instances(&[instance], OutputFormat::Table).unwrap();
        assert!(rendered.contains("i-0abc"));
        assert!(rendered.contains("running"));
        assert!(rendered.contains("web-1"));
    }

    #[test]
    fn instance_json_includes_tags() {
        let rendered =
            render_instances(&[owned_instance("i-1", "stopped")], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value[0]["instance_id"], "i-1");
        assert_eq!(value[0]["state"], "stopped");
        assert_eq!(value[0]["tags"]["CreatedBy"], "platform-cli");
    }

    #[test]
    fn empty_lists_have_a_message() {
        assert_eq!(
            render_instances(&[], OutputFormat::Table).unwrap(),
            "No managed instances found"
        );
        assert_eq!(render_zones(&[], OutputFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn zone_json_uses_bare_id() {
        let zone = HostedZoneSummary {
            id: ZoneId::normalize("/hostedzone/Z123"),
            name: "example.com.".to_string(),
        };

        let rendered = render_zones(&[zone], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["id"], "Z123");
        assert_eq!(value[0]["name"], "example.com.");
    }
}
