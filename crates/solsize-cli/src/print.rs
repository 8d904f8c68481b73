//! Report rendering
//!
//! Tables are plain column-aligned text with ANSI coloring. When an output
//! file is configured the same table is written with styling stripped.

use std::fmt::Write as _;

use color_eyre::eyre::Result;
use console::{strip_ansi_codes, style};
use solsize_core::{
    count_oversized, ensure_unique_display_names, proximity, ContractSize, MergedContractSize,
    Proximity, SizeRecord, SizeUnit, SolcSettings, DEPLOYED_SIZE_LIMIT, INIT_SIZE_LIMIT,
};

use crate::config::SizerConfig;

/// Print the size report for a single snapshot
pub fn print_sizes(sizes: &[ContractSize], config: &SizerConfig) -> Result<()> {
    ensure_unique_display_names(sizes, config.flat)?;

    let mut lines = render_table(sizes, config, |_, cells| cells);
    push_oversize_warning(&mut lines, count_oversized(sizes), config.unit);
    emit(&lines, config)
}

/// Print the merged cross-revision report with change annotations
pub fn print_merged(merged: &[MergedContractSize], config: &SizerConfig) -> Result<()> {
    ensure_unique_display_names(merged, config.flat)?;

    let unit = config.unit;
    let mut lines = render_table(merged, config, |record, cells| {
        annotate_merged_row(record, cells, unit)
    });

    if merged.iter().any(|m| m.settings_changed) {
        lines.push(
            style("*solc settings have changed between revisions")
                .dim()
                .to_string(),
        );
    }

    push_oversize_warning(&mut lines, count_oversized(merged), config.unit);
    emit(&lines, config)
}

// =============================================================================
// Table assembly
// =============================================================================

/// A table cell carrying both the unstyled text (for width computation)
/// and the styled text (for display)
struct Cell {
    plain: String,
    styled: String,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            styled: text.clone(),
            plain: text,
        }
    }

    fn styled(plain: impl Into<String>, styled: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            styled: styled.into(),
        }
    }

    fn width(&self) -> usize {
        self.plain.chars().count()
    }

    fn pad_right(&self, width: usize) -> String {
        format!("{}{}", self.styled, " ".repeat(width - self.width()))
    }

    fn pad_left(&self, width: usize) -> String {
        format!("{}{}", " ".repeat(width - self.width()), self.styled)
    }
}

enum Row {
    /// Full-width settings group header
    Group(String),
    /// Name, deployed size, initcode size
    Entry([Cell; 3]),
}

fn render_table<T, F>(records: &[T], config: &SizerConfig, annotate: F) -> Vec<String>
where
    T: SizeRecord,
    F: Fn(&T, [Cell; 3]) -> [Cell; 3],
{
    let unit = config.unit;
    let header = [
        Cell::plain("Contract Name"),
        Cell::plain(format!("Deployed size ({unit})")),
        Cell::plain(format!("Initcode size ({unit})")),
    ];

    let mut rows = Vec::new();

    for (settings, group) in group_by_settings(records, config) {
        rows.push(Row::Group(format_settings_header(&settings)));

        for record in group {
            // interfaces and abstract contracts have nothing to report
            if record.deploy_size() == 0 && record.init_size() == 0 {
                continue;
            }

            let cells = [
                Cell::plain(record.display_name(config.flat)),
                format_size_cell(record.deploy_size(), DEPLOYED_SIZE_LIMIT, unit),
                format_size_cell(record.init_size(), INIT_SIZE_LIMIT, unit),
            ];
            rows.push(Row::Entry(annotate(record, cells)));
        }
    }

    // column widths from the header and every entry row
    let mut widths = [header[0].width(), header[1].width(), header[2].width()];
    for row in &rows {
        if let Row::Entry(cells) = row {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.width());
            }
        }
    }

    let total_width = widths.iter().sum::<usize>() + 2 * COLUMN_GAP.len();

    let mut lines = Vec::new();
    lines.push(format_entry_line(&header, &widths, true));
    lines.push("-".repeat(total_width));

    for row in &rows {
        match row {
            Row::Group(line) => lines.push(line.clone()),
            Row::Entry(cells) => lines.push(format_entry_line(cells, &widths, false)),
        }
    }

    lines
}

const COLUMN_GAP: &str = "   ";

fn format_entry_line(cells: &[Cell; 3], widths: &[usize; 3], bold: bool) -> String {
    let mut line = String::new();
    write!(line, "{}", cells[0].pad_right(widths[0])).unwrap();
    write!(line, "{COLUMN_GAP}{}", cells[1].pad_left(widths[1])).unwrap();
    write!(line, "{COLUMN_GAP}{}", cells[2].pad_left(widths[2])).unwrap();

    if bold {
        style(line).bold().to_string()
    } else {
        line
    }
}

fn format_settings_header(settings: &SolcSettings) -> String {
    let (optimizer, runs) = if settings.solc_version == "unknown" {
        ("unknown".to_string(), "unknown".to_string())
    } else {
        (settings.optimizer.to_string(), settings.runs.to_string())
    };

    style(format!(
        "Solc version: {}  Optimizer enabled: {}  Runs: {}",
        settings.solc_version, optimizer, runs
    ))
    .dim()
    .to_string()
}

/// Group records by settings equivalence, preserving the configured sort
/// order within each group
fn group_by_settings<'a, T: SizeRecord>(
    records: &'a [T],
    config: &SizerConfig,
) -> Vec<(SolcSettings, Vec<&'a T>)> {
    let mut groups: Vec<(SolcSettings, Vec<&T>)> = Vec::new();

    for record in records {
        match groups
            .iter_mut()
            .find(|(settings, _)| settings.is_equivalent(record.solc_settings()))
        {
            Some((_, group)) => group.push(record),
            None => groups.push((record.solc_settings().clone(), vec![record])),
        }
    }

    for (_, group) in &mut groups {
        if config.alpha_sort {
            group.sort_by_key(|r| r.display_name(config.flat).to_uppercase());
        } else {
            group.sort_by_key(|r| r.deploy_size());
        }
    }

    groups
}

// =============================================================================
// Cell formatting
// =============================================================================

fn format_size_cell(size: usize, limit: usize, unit: SizeUnit) -> Cell {
    let text = unit.format(size);
    let styled = match proximity(size, limit) {
        Proximity::Over => style(&text).red().bold().to_string(),
        Proximity::Near => style(&text).yellow().bold().to_string(),
        Proximity::Ok => text.clone(),
    };
    Cell::styled(text, styled)
}

/// Append change annotations and the settings-changed marker to a merged row
fn annotate_merged_row(record: &MergedContractSize, cells: [Cell; 3], unit: SizeUnit) -> [Cell; 3] {
    let [name, deploy, init] = cells;

    let name = if record.settings_changed {
        Cell::styled(
            format!("{}*", name.plain),
            format!("{}{}", name.styled, style("*").dim()),
        )
    } else {
        name
    };

    [
        name,
        append_diff(deploy, record.deploy_size, record.previous_deploy_size, unit),
        append_diff(init, record.init_size, record.previous_init_size, unit),
    ]
}

fn append_diff(cell: Cell, size: usize, previous: Option<usize>, unit: SizeUnit) -> Cell {
    let Some(previous) = previous else {
        // newly added contract, nothing to diff against
        return cell;
    };

    let diff = format_size_diff(size, previous, unit);
    Cell::styled(
        format!("{} ({})", cell.plain, diff.plain),
        format!("{} ({})", cell.styled, diff.styled),
    )
}

fn format_size_diff(size: usize, previous: usize, unit: SizeUnit) -> Cell {
    if size < previous {
        let text = format!("-{}", unit.format(previous - size));
        Cell::styled(text.clone(), style(text).green().to_string())
    } else if size > previous {
        let text = format!("+{}", unit.format(size - previous));
        Cell::styled(text.clone(), style(text).red().to_string())
    } else {
        let text = unit.format(0);
        Cell::styled(text.clone(), style(text).dim().to_string())
    }
}

// =============================================================================
// Output
// =============================================================================

fn push_oversize_warning(lines: &mut Vec<String>, oversized_count: usize, unit: SizeUnit) {
    if oversized_count == 0 {
        return;
    }

    let subject_predicate = if oversized_count == 1 {
        "contract exceeds"
    } else {
        "contracts exceed"
    };

    let message = format!(
        "Warning: {} {} the size limit for mainnet deployment ({} {} deployed, {} {} init).",
        oversized_count,
        subject_predicate,
        unit.format(DEPLOYED_SIZE_LIMIT),
        unit,
        unit.format(INIT_SIZE_LIMIT),
        unit,
    );

    lines.push(String::new());
    lines.push(style(message).red().to_string());
}

fn emit(lines: &[String], config: &SizerConfig) -> Result<()> {
    match &config.output_file {
        Some(path) => {
            let mut content = String::new();
            for line in lines {
                content.push_str(&strip_ansi_codes(line));
                content.push('\n');
            }
            std::fs::write(path, content)?;
        }
        None => {
            for line in lines {
                println!("{line}");
            }
        }
    }

    Ok(())
}
