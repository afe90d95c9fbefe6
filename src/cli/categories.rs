//! Categories command implementation

use serde_json::{json, Value};
use std::process::ExitCode;

use crate::catalog::{Category, BASELINE_RELATION, BASELINE_SIZES, PWA_SIZES};
use crate::models::{Dimension, Relation};

use super::{EXIT_ERROR, EXIT_SUCCESS};

fn proportions(sizes: &[Dimension]) -> Vec<String> {
    sizes.iter().map(Dimension::proportions).collect()
}

fn relation_name(relation: Option<Relation>) -> &'static str {
    relation.map_or("-", |r| r.as_str())
}

/// Catalog as a JSON document
pub fn catalog_json() -> Value {
    let categories: Vec<Value> = Category::ALL
        .iter()
        .map(|category| {
            json!({
                "id": category.id(),
                "label": category.label(),
                "relation": category.relation().map(|r| r.as_str()),
                "sizes": proportions(category.sizes()),
                "auxiliary_file": category.auxiliary().map(|f| f.file_name()),
            })
        })
        .collect();

    json!({
        "baseline": {
            "relation": BASELINE_RELATION.map(|r| r.as_str()),
            "sizes": proportions(&BASELINE_SIZES),
        },
        "pwa": {
            "relation": null,
            "sizes": proportions(&PWA_SIZES),
        },
        "categories": categories,
    })
}

/// Catalog as aligned text lines
pub fn catalog_text() -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Baseline (always generated, packed into favicon.ico): {} [{}]\n",
        proportions(&BASELINE_SIZES).join(", "),
        relation_name(BASELINE_RELATION)
    ));
    out.push_str(&format!(
        "PWA (generated with a manifest): {}\n\n",
        proportions(&PWA_SIZES).join(", ")
    ));

    out.push_str(&format!("{:<18} {:<24} {:<17} SIZES\n", "ID", "LABEL", "RELATION"));
    for category in Category::ALL {
        let mut sizes = proportions(category.sizes()).join(", ");
        if let Some(file) = category.auxiliary() {
            sizes.push_str(&format!(" (+ {})", file.file_name()));
        }
        out.push_str(&format!(
            "{:<18} {:<24} {:<17} {}\n",
            category.id(),
            category.label(),
            relation_name(category.relation()),
            sizes
        ));
    }
    out
}

/// Execute the categories command
pub fn run_categories(json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(&catalog_json()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", catalog_text());
    }
    ExitCode::from(EXIT_SUCCESS)
}
