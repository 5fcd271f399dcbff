//! Text output for the CLI commands.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use sidebar_text::{HighlightAnimation, Segment, strip};
use sidebar_wire::{ObjectiveAction, Packet, ScoreAction};

use crate::render::FrameRecord;

/// One line per frame: stage, packet name, hex bytes.
pub fn frames_hex(records: &[FrameRecord]) -> String {
    records
        .iter()
        .map(|record| format!("{}\t{}\t{}\n", record.stage, record.packet.name(), record.frame))
        .collect()
}

pub fn frames_json(records: &[FrameRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn frames_table(records: &[FrameRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Packet"),
        header_cell("Id"),
        header_cell("Fields"),
        header_cell("Bytes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(record.stage).fg(Color::DarkGrey),
            Cell::new(record.packet.name()).add_attribute(Attribute::Bold),
            Cell::new(format!("0x{:02X}", record.packet.id())),
            Cell::new(describe(&record.packet)),
            Cell::new(record.frame.len() / 2),
        ]);
    }
    table
}

/// Short human summary of a packet's fields.
pub fn describe(packet: &Packet) -> String {
    match packet {
        Packet::Objective(objective) => match &objective.action {
            ObjectiveAction::Create { title } => format!("create {:?}", visible(title)),
            ObjectiveAction::Update { title } => format!("update {:?}", visible(title)),
            ObjectiveAction::Delete => "delete".to_string(),
        },
        Packet::DisplayObjective(display) => {
            format!("position {} -> {}", display.position, display.name)
        }
        Packet::Score(score) => match &score.action {
            ScoreAction::Change { value, .. } => {
                format!("change {:?} = {value}", visible(&score.entry))
            }
            ScoreAction::Remove => format!("remove {:?}", visible(&score.entry)),
        },
        Packet::Team(team) => format!(
            "{:?} team {} prefix {:?} suffix {:?}",
            team.action,
            team.name,
            visible(&team.prefix),
            visible(&team.suffix)
        ),
    }
}

/// Escape tokens shown with `&` so they stay readable in a terminal.
fn visible(text: &str) -> String {
    text.replace(sidebar_text::MARKER, "&")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    pub raw: String,
    pub budget: usize,
    pub head: String,
    pub carry_prefix: String,
    pub tail: String,
    pub suffix: String,
    pub lag: usize,
    pub max_raw_len: usize,
}

impl SegmentReport {
    pub fn new(raw: &str, budget: usize, split: &Segment) -> Self {
        Self {
            raw: raw.to_string(),
            budget,
            head: split.head.clone(),
            carry_prefix: split.carry_prefix.clone(),
            tail: split.tail.clone(),
            suffix: split.suffix(),
            lag: split.lag,
            max_raw_len: split.max_raw_len(budget, budget),
        }
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Part"),
            header_cell("Raw"),
            header_cell("Visible"),
            header_cell("Chars"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 3, CellAlignment::Right);
        for (name, text) in [
            ("input", &self.raw),
            ("head", &self.head),
            ("carry", &self.carry_prefix),
            ("suffix", &self.suffix),
        ] {
            table.add_row(vec![
                Cell::new(name).add_attribute(Attribute::Bold),
                Cell::new(visible(text)),
                Cell::new(strip(text).unwrap_or_default()),
                Cell::new(text.chars().count()),
            ]);
        }
        table
    }
}

/// The first `count` frames of `animation`, shown with `&` codes.
pub fn animation_frames(animation: &mut HighlightAnimation, count: usize) -> Vec<String> {
    animation
        .by_ref()
        .take(count)
        .map(|frame| visible(&frame))
        .collect()
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use sidebar_wire::{ScorePacket, TeamPacket};

    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(
            describe(&ScorePacket::change("§3", "board", 3).into()),
            "change \"&3\" = 3"
        );
        assert_eq!(
            describe(&TeamPacket::update("3", "§aHi", "", "§3").into()),
            "Update team 3 prefix \"&aHi\" suffix \"\""
        );
    }

    #[test]
    fn test_frames_hex_lines() {
        let packet = Packet::from(ScorePacket::remove("§e"));
        let records = vec![
            FrameRecord {
                stage: crate::render::Stage::Tick(1),
                packet: packet.clone(),
                frame: "063c03c2a76501".to_string(),
            },
            FrameRecord {
                stage: crate::render::Stage::Detach,
                packet,
                frame: "063c03c2a76501".to_string(),
            },
        ];
        assert_eq!(
            frames_hex(&records),
            "tick 1\tscore\t063c03c2a76501\ndetach\tscore\t063c03c2a76501\n"
        );
        assert_eq!(frames_hex(&[]), "");
    }

    #[test]
    fn test_animation_frames() {
        let mut animation = HighlightAnimation::with_state(
            "Hi",
            sidebar_text::Formatting::Gold,
            sidebar_text::Formatting::White,
            1,
            0,
        );
        assert_eq!(
            animation_frames(&mut animation, 3),
            vec!["&6Hi", "&6&fH&fi", "&6H&fi"]
        );
    }

    #[test]
    fn test_segment_report() {
        let split = sidebar_text::segment("§aOnline players: 12", 16).unwrap();
        let report = SegmentReport::new("§aOnline players: 12", 16, &split);
        assert_eq!(report.suffix, "§a: 12");
        assert_eq!(report.max_raw_len, 30);
        assert_eq!(report.table().row_count(), 4);
    }
}
