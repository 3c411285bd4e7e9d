//! Command line renderer: loads a blueprint from a KDL file or a stored
//! JSON project and writes the laid-out graphs as an SVG document.

mod kdl;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use flowmap_layout::svg::{render_blueprint, write_svg};
use flowmap_layout::Layout;
use flowmap_model::{Blueprint, Project};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        bail!("usage: flowmap-viewer <blueprint.kdl | project.json> [output.svg]");
    };
    let input = PathBuf::from(input);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("svg"));

    let blueprint = load_blueprint(&input)?;
    let document = render_blueprint(&blueprint, &Layout::default());
    write_svg(&document, &output).with_context(|| format!("writing {}", output.display()))?;
    info!(output = %output.display(), "rendered blueprint");
    Ok(())
}

fn load_blueprint(path: &Path) -> anyhow::Result<Blueprint> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("kdl") => kdl::parse_blueprint(&content)
            .with_context(|| format!("parsing {}", path.display())),
        Some("json") => {
            // Stored projects wrap the blueprint; accept either shape.
            if let Ok(project) = serde_json::from_str::<Project>(&content) {
                return Ok(project.blueprint);
            }
            serde_json::from_str::<Blueprint>(&content)
                .with_context(|| format!("parsing {}", path.display()))
        }
        _ => bail!("unsupported input '{}', expected .kdl or .json", path.display()),
    }
}
