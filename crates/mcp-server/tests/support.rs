#![allow(dead_code)]

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub fn locate_order_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_order-mcp") {
        return Ok(PathBuf::from(path));
    }

    // `.../target/{debug|release}/deps/<test>` -> `.../target/{debug|release}/order-mcp`
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join("order-mcp");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .ancestors()
        .nth(2)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")?;
    for rel in ["target/debug/order-mcp", "target/release/order-mcp"] {
        let candidate = repo_root.join(rel);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("failed to locate order-mcp binary; build with: cargo build -p order-mcp")
}

pub fn sample_menu() -> serde_json::Value {
    serde_json::json!({
        "menuItems": [
            {
                "category": "Signature Lattes",
                "items": [
                    {"name": "Caramel Craze Latte", "description": "Caramel and espresso", "sizes": ["small", "medium", "large"]},
                    {"name": "Cookie Butter Latte", "description": "Spiced cookie butter"}
                ]
            },
            {
                "category": "Cold Beverages",
                "items": [{"name": "Original Cold Brew", "description": "Slow steeped", "sizes": ["medium", "pot"]}]
            },
            {
                "category": "Donuts & Bakery",
                "items": [
                    {"name": "Glazed Donut", "description": "Classic ring"},
                    {"name": "Boston Kreme", "description": "Custard filled"}
                ]
            },
            {
                "category": "Breakfast Sandwiches",
                "items": [{"name": "Sourdough Sunrise", "description": "Egg and cheese on sourdough"}]
            },
            {
                "category": "Extras",
                "items": [{"name": "Extra Espresso Shot"}, {"name": "Whipped Cream"}]
            }
        ]
    })
}

pub fn write_menu(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("menuItems.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&sample_menu())?)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
