use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use itertools::Itertools;
use seatforge::api::{GenerateResult, PlanView};
use seatforge::config::ScoreWeights;
use seatforge::scorer::ScoreDetails;

fn header(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Center)
}

/// Seat grid: one row per line, members labelled `<group><index>`, `##` for
/// forbidden seats.
pub fn print_plan(name: &str, plan: &PlanView) {
    let (w, h) = (plan.grid_size.width, plan.grid_size.height);
    let mut labels = vec![String::new(); w * h];
    for seat in &plan.forbidden_seats {
        if seat.line < h && seat.col < w {
            labels[seat.line * w + seat.col] = "##".to_string();
        }
    }
    for entry in &plan.placement {
        let s = entry.seat;
        if s.line < h && s.col < w {
            labels[s.line * w + s.col] = format!("{}{}", entry.member.group_name, entry.member.index);
        }
    }

    println!("\nPlan: {} (score {})", name, plan.score);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(
        std::iter::once(header(""))
            .chain((0..w).map(|c| header(&c.to_string())))
            .collect::<Vec<_>>(),
    );

    for (line, row) in labels.chunks(w.max(1)).enumerate() {
        let cells: Vec<Cell> = std::iter::once(header(&line.to_string()))
            .chain(
                row.iter()
                    .map(|label| Cell::new(label).set_alignment(CellAlignment::Center)),
            )
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);

    let groups = plan
        .placement
        .iter()
        .map(|e| (&e.member.group_name, &e.member.group_color))
        .unique()
        .map(|(name, color)| format!("{} {}", name, color))
        .join(", ");
    if !groups.is_empty() {
        println!("Groups: {}", groups);
    }
}

pub fn print_summary(result: &GenerateResult) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![header("Metric"), header("Value")]);

    table.add_row(vec![
        Cell::new("Best Score"),
        Cell::new(result.best_plan.score).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Gen of Best"),
        Cell::new(result.gen_of_best_plan.generation).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Average Score"),
        Cell::new(format!("{:.2}", result.average_score)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Time (s)"),
        Cell::new(format!("{:.3}", result.time)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Error"),
        Cell::new(result.error.as_deref().unwrap_or("-")),
    ]);

    println!("\n=== RUN SUMMARY ===");
    println!("{}", table);
}

pub fn print_score_details(d: &ScoreDetails, w: &ScoreWeights) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![header("Category"), header("Count"), header("Weight"), header("Score")]);

    let rows = [
        ("Left/Right", d.stat_left_right, w.left_right, d.left_right_bonus),
        ("Top/Bottom", d.stat_top_bottom, w.top_bottom, d.top_bottom_bonus),
        ("Isolated", d.stat_isolated, w.malus, d.isolation_malus),
        ("Constraint", d.stat_constraint_violations, w.malus, d.constraint_malus),
    ];
    for (name, count, weight, score) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(count).set_alignment(CellAlignment::Right),
            Cell::new(weight).set_alignment(CellAlignment::Right),
            Cell::new(score).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(d.seated_members).set_alignment(CellAlignment::Right),
        Cell::new(""),
        Cell::new(d.total)
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    println!("\n=== SCORE BREAKDOWN ===");
    println!("{}", table);
    if d.unseated_members > 0 {
        println!("Unseated members: {}", d.unseated_members);
    }
}
