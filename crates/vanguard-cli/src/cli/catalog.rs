//! Catalog validation command.

use std::path::Path;

use anyhow::Result;
use console::style;

use vanguard_infra::file::catalog::load_catalog;

/// Validate a catalog file and print its activation order.
///
/// Always validates strictly, regardless of `reject_cyclic_catalogs`.
pub async fn validate_catalog(path: &Path, json: bool) -> Result<()> {
    let catalog = load_catalog(path).await?;
    let verdict = catalog
        .graph(true)
        .and_then(|graph| graph.activation_order(&catalog.skills));

    if json {
        let out = match &verdict {
            Ok(order) => serde_json::json!({
                "valid": true,
                "skills": catalog.skills.len(),
                "prerequisites": catalog.prerequisites.len(),
                "activation_order": order,
            }),
            Err(e) => serde_json::json!({
                "valid": false,
                "error": e.to_string(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!();
        match &verdict {
            Ok(order) => {
                println!(
                    "  {} {} skills, {} prerequisites",
                    style("✓").green(),
                    catalog.skills.len(),
                    catalog.prerequisites.len()
                );
                let order: Vec<&str> = order.iter().map(|id| id.as_str()).collect();
                println!("  {} {}", style("Order:").dim(), order.join(" → "));
            }
            Err(e) => println!("  {} {}", style("✗").red(), e),
        }
        println!();
    }

    verdict.map(|_| ()).map_err(Into::into)
}
