use crate::types::{Dimensions, PlacedUnit};

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// Top view of the units cut by a horizontal plane at `height`: length runs
/// across, width runs down.
pub fn render_layer(container: Dimensions, placed: &[PlacedUnit], height: f64) -> String {
    if !container.is_valid() {
        return String::new();
    }
    let scale = f64::min(MAX_WIDTH / container.length, MAX_HEIGHT / container.width);
    let grid_w = (container.length * scale).round() as usize;
    let grid_h = (container.width * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    // Container walls first
    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for p in placed.iter().filter(|p| p.z <= height && height < p.z + p.dims.height) {
        let sx = (p.x * scale).round() as usize;
        let sy = (p.y * scale).round() as usize;
        let sw = (p.dims.length * scale).round() as usize;
        let sh = (p.dims.width * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        let label: Vec<char> = format!("{}x{}", p.dims.length, p.dims.width).chars().collect();
        if sw > 2 {
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            let start_x = cx.saturating_sub(label.len() / 2);

            for (i, &ch) in label.iter().enumerate() {
                let x = start_x + i;
                if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                    grid[cy][x] = ch;
                }
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

/// Distinct heights at which a new layer of units starts, lowest first.
pub fn layer_heights(placed: &[PlacedUnit]) -> Vec<f64> {
    let mut heights: Vec<f64> = placed.iter().map(|p| p.z).collect();
    heights.sort_by(f64::total_cmp);
    heights.dedup();
    heights
}

fn join(existing: char, edge: char) -> char {
    match existing {
        '+' => '+',
        '|' if edge == '-' => '+',
        '-' if edge == '|' => '+',
        _ => edge,
    }
}

fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let Some(cols) = grid.first().map(Vec::len) else {
        return;
    };

    for i in (x..=x + w).filter(|&i| i < cols) {
        for j in [y, y + h] {
            if j < rows {
                grid[j][i] = join(grid[j][i], '-');
            }
        }
    }

    for j in (y..=y + h).filter(|&j| j < rows) {
        for i in [x, x + w] {
            if i < cols {
                grid[j][i] = join(grid[j][i], '|');
            }
        }
    }

    for cx in [x, x + w] {
        for cy in [y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}
