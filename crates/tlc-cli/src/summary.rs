use std::path::Path;

use console::Style;
use tlc_core::annotation::{AnnotationSet, Modality, PlateAnnotation, Role};
use tlc_core::pipeline::config::PipelineConfig;
use tlc_core::pipeline::BatchReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red().bold(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

pub fn print_analysis_summary(config: &PipelineConfig, source: &Path, plates: usize) {
    let s = Styles::new();

    print_title(&s, "TLC Analysis");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(source.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Plates"),
        s.value.apply_to(plates)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Primary"),
        s.method.apply_to(config.primary)
    );
    println!();

    println!("  {}", s.header.apply_to("Calibration"));
    for &modality in Modality::ALL {
        println!(
            "    {:<12}{}",
            s.label.apply_to(modality),
            s.value
                .apply_to(format!("{} cm/px", config.calibration.pixels_to_cm(modality)))
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Deduplication"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Tolerance"),
        s.value.apply_to(&config.dedup)
    );
    println!();
}

/// Diagnostics for skipped plates first, then the results of the plates
/// that were computed.
pub fn print_report(report: &BatchReport) {
    let s = Styles::new();

    for skipped in &report.skipped {
        eprintln!("{}", s.error.apply_to(skipped));
    }
    for note in &report.notes {
        eprintln!("{} {}", s.disabled.apply_to("Note:"), note);
    }

    if report.results.is_empty() {
        println!(
            "\n{}",
            s.disabled
                .apply_to("No plates could be analyzed. Check that every plate has a baseline and a solvent line.")
        );
        return;
    }

    for result in &report.results {
        println!("\n{}:", s.header.apply_to(result.display_name()));
        println!(
            "  {} {}",
            s.label.apply_to("Solvent Front Distance:"),
            s.value
                .apply_to(format!("{:.1} cm", result.solvent_front_distance_cm))
        );
        if result.components.is_empty() {
            println!("  {}", s.disabled.apply_to("no spots"));
        }
        for component in &result.components {
            println!("  {}", component);
        }
    }
    println!();
}

fn describe_annotation(s: &Styles, annotation: Option<&PlateAnnotation>) -> String {
    let Some(ann) = annotation else {
        return s.disabled.apply_to("not annotated").to_string();
    };
    let counts = format!(
        "{} baseline, {} solvent, {} spots",
        ann.points(Role::Baseline).len(),
        ann.points(Role::SolventLine).len(),
        ann.points(Role::Spots).len()
    );
    match ann.missing_reference() {
        None => format!("{}", s.value.apply_to(counts)),
        Some(role) => format!(
            "{}  {}",
            s.value.apply_to(counts),
            s.error.apply_to(format!("missing {role}"))
        ),
    }
}

pub fn print_session_info(set: &AnnotationSet, source: &Path) {
    let s = Styles::new();

    print_title(&s, "TLC Session");
    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(source.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Plates"),
        s.value.apply_to(set.len())
    );
    println!();

    for plate in set {
        println!("  {}", s.header.apply_to(plate.display_name()));
        for &modality in Modality::ALL {
            println!(
                "    {:<12}{}",
                s.label.apply_to(modality),
                describe_annotation(&s, plate.annotation(modality))
            );
        }
        println!();
    }
}
