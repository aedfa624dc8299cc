use std::path::Path;

use console::Style;
use eclipse_core::pipeline::config::EclipseConfig;
use eclipse_core::pipeline::ScanReport;
use eclipse_core::rules::RuleTable;
use eclipse_core::session::VideoSession;
use eclipse_core::timestamp::Timestamp;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    event: Style,
    time: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            event: Style::new().green(),
            time: Style::new().bold().yellow(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

pub fn print_scan_header(
    input: &Path,
    session: &VideoSession,
    config: &EclipseConfig,
    rules: &RuleTable,
) {
    let s = Styles::new();

    print_title(&s, "Eclipse Scan");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Snapshots"),
        s.path.apply_to(config.snapshots.directory.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Format"),
        s.value.apply_to(config.snapshots.format)
    );
    println!();

    println!("  {}", s.header.apply_to("Video"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(session.total_frames())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Frame rate"),
        s.value.apply_to(format!("{:.3} fps", session.fps()))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Duration"),
        s.value.apply_to(format!("{:.1} s", session.duration_seconds()))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Starts at"),
        s.time
            .apply_to(Timestamp::from_seconds(session.start_offset().as_secs()))
    );
    println!();

    println!("  {}", s.header.apply_to("Classifier"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min conf."),
        s.value.apply_to(config.classifier.min_confidence)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Rules"),
        s.value.apply_to(rules.len())
    );
    println!();
}

pub fn print_rule_table(rules: &RuleTable) {
    let s = Styles::new();

    print_title(&s, "Transition Rules");

    if rules.is_empty() {
        println!("  {}", s.disabled.apply_to("no rules configured"));
        println!();
        return;
    }

    for rule in rules.rules() {
        println!(
            "  {:<22} \u{2192} {:<22} {}",
            s.value.apply_to(&rule.from),
            s.value.apply_to(&rule.to),
            s.event.apply_to(&rule.event_name)
        );
    }
    println!();
}

pub fn print_event_log(report: &ScanReport) {
    let s = Styles::new();

    print_title(&s, "Detected Eclipse Stages");

    if report.events.is_empty() {
        println!("  {}", s.disabled.apply_to("no stage transitions detected"));
    }
    for event in report.events.events() {
        println!(
            "  {}  {}",
            s.time.apply_to(event.timestamp),
            s.event.apply_to(&event.event_name)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Snapshot"),
            s.path.apply_to(event.snapshot.path().display())
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Samples"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Classified"),
        s.value.apply_to(report.samples_classified)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("No detection"),
        s.value.apply_to(report.samples_without_detection)
    );
    for (label, count) in &report.label_counts {
        println!(
            "    {:<14}{}",
            s.label.apply_to(label),
            s.value.apply_to(count)
        );
    }
    println!();

    if let Some(summary) = report.summary() {
        println!("  {}", s.header.apply_to("Summary"));
        println!(
            "    First stage detected was {} at {}, last was {} at {}.",
            s.event.apply_to(&summary.first_event_name),
            s.time.apply_to(summary.first_timestamp),
            s.event.apply_to(&summary.last_event_name),
            s.time.apply_to(summary.last_timestamp)
        );
        println!();
    }
}
