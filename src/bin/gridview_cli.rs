//! CLI tool for gridview - computes render windows for a synthetic dataset
//! and outputs the scroll/draw diagnostics as JSON
//!
//! Usage:
//!   gridview_cli <rows> <cols> [scroll_y]              # Output JSON to stdout
//!   gridview_cli <rows> <cols> [scroll_y] -o out.json  # Output JSON to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use gridview::types::{CellContent, GridSettings, GridSource};
use gridview::viewer::GridView;

struct SyntheticSource {
    rows: u32,
    cols: u32,
}

impl GridSource for SyntheticSource {
    fn count_rows(&self) -> u32 {
        self.rows
    }

    fn count_cols(&self) -> u32 {
        self.cols
    }

    fn render_cell(&self, row: u32, col: u32, target: &mut CellContent) {
        target.text = format!("R{row}C{col}");
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: gridview_cli <rows> <cols> [scroll_y] [-o output.json]");
        std::process::exit(1);
    }

    let rows: u32 = match args[1].parse() {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Invalid row count {}: {}", args[1], e);
            std::process::exit(1);
        }
    };
    let cols: u32 = match args[2].parse() {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Invalid column count {}: {}", args[2], e);
            std::process::exit(1);
        }
    };
    let scroll_y: f32 = args
        .get(3)
        .filter(|a| !a.starts_with('-'))
        .and_then(|a| a.parse().ok())
        .unwrap_or(0.0);

    let output_path = args
        .iter()
        .position(|a| a == "-o")
        .and_then(|i| args.get(i + 1));

    // Build a grid with one frozen row and column so the overlay panes
    // show up in the diagnostics
    let mut view = GridView::new_test(800.0, 600.0);
    view.set_source(Box::new(SyntheticSource { rows, cols }));
    view.set_settings(GridSettings {
        fixed_rows_top: 1,
        fixed_columns_left: 1,
        ..GridSettings::default()
    });
    for kind in ["top", "left", "top_left_corner"] {
        if let Err(e) = view.create_pane(kind) {
            eprintln!("Error creating pane: {}", e);
            std::process::exit(1);
        }
    }

    if scroll_y > 0.0 {
        let _ = view.scroll(0.0, scroll_y);
    }
    view.draw(false);

    let json = match view.get_scroll_debug() {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
