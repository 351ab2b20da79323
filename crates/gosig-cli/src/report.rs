use gosig_engine::RootReport;
use serde_json::{json, Value};

/// Print one count line per root, optionally preceded by every signature.
/// Failed roots go to stderr and do not stop the rest.
pub fn print_text(reports: &[RootReport], list: bool) {
    for report in reports {
        match &report.result {
            Ok(walk) => {
                if list {
                    for sig in &walk.signatures {
                        println!("{sig}");
                    }
                }
                println!("{}", walk.signatures.len());
            }
            Err(e) => eprintln!("failed to walk {}: {e}", report.root.display()),
        }
    }
}

pub fn to_json(reports: &[RootReport]) -> Value {
    let roots: Vec<Value> = reports
        .iter()
        .map(|report| match &report.result {
            Ok(walk) => json!({
                "root": report.root,
                "count": walk.signatures.len(),
                "files": walk.files_visited,
                "skipped": walk
                    .skipped
                    .iter()
                    .map(|s| json!({ "path": s.path, "reason": s.reason.to_string() }))
                    .collect::<Vec<_>>(),
                "signatures": walk.signatures,
            }),
            Err(e) => json!({
                "root": report.root,
                "error": e.to_string(),
            }),
        })
        .collect();
    json!({ "roots": roots })
}
