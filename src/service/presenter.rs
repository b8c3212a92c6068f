//! Turns resolved services into display rows

use super::model::{DisplayRow, ServiceResolution};
use super::platform::{PlatformContext, UrlSuppression};

/// Port status shown for services without a node port
pub const NO_NODE_PORT: &str = "No node port";

/// Build one display row per resolved service, preserving input order.
///
/// Services without URLs get the `No node port` status. On platforms where
/// `suppression` hides URLs, the URL text is blanked but the port status is
/// left empty so the row still reads as "has a port".
pub fn present<S>(
    records: &[ServiceResolution],
    platform: &PlatformContext,
    suppression: &S,
) -> Vec<DisplayRow>
where
    S: UrlSuppression + ?Sized,
{
    let suppress = suppression.should_suppress_urls(platform);
    records
        .iter()
        .map(|record| present_one(record, suppress))
        .collect()
}

fn present_one(record: &ServiceResolution, suppress: bool) -> DisplayRow {
    let (port_status, urls) = if !record.has_node_port() {
        (NO_NODE_PORT.to_string(), String::new())
    } else if suppress {
        (String::new(), String::new())
    } else {
        (String::new(), record.urls.join("\n"))
    };

    DisplayRow {
        namespace: record.namespace.clone(),
        name: record.name.clone(),
        port_status,
        urls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::platform::SuppressionRules;

    fn never(_: &PlatformContext) -> bool {
        false
    }

    #[test]
    fn test_multiple_urls_joined_in_order() {
        let records = vec![ServiceResolution::new(
            "default",
            "multi",
            vec![
                "http://192.168.49.2:31000".to_string(),
                "http://192.168.49.2:30000".to_string(),
            ],
        )];
        let rows = present(&records, &PlatformContext::new("linux", "kvm2"), &never);
        assert_eq!(
            rows[0].urls,
            "http://192.168.49.2:31000\nhttp://192.168.49.2:30000"
        );
        assert!(rows[0].port_status.is_empty());
    }

    #[test]
    fn test_suppression_only_checked_once() {
        use std::cell::Cell;
        let calls = Cell::new(0);
        let counting = |_: &PlatformContext| {
            calls.set(calls.get() + 1);
            true
        };
        let records = vec![
            ServiceResolution::new("a", "one", vec!["http://x:1".into()]),
            ServiceResolution::new("b", "two", vec!["http://x:2".into()]),
        ];
        let rows = present(&records, &PlatformContext::new("darwin", "docker"), &counting);
        assert_eq!(calls.get(), 1);
        assert!(rows.iter().all(|r| r.urls.is_empty() && r.port_status.is_empty()));
    }

    #[test]
    fn test_no_node_port_wins_over_suppression() {
        let records = vec![ServiceResolution::new("default", "kubernetes", vec![])];
        let rows = present(
            &records,
            &PlatformContext::new("darwin", "docker"),
            &SuppressionRules::default(),
        );
        assert_eq!(rows[0].port_status, NO_NODE_PORT);
        assert_eq!(rows[0].urls, "");
    }

    #[test]
    fn test_empty_input() {
        let rows = present(&[], &PlatformContext::new("linux", "docker"), &never);
        assert!(rows.is_empty());
    }
}
