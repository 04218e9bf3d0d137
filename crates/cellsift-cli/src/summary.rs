use console::Style;
use cellsift_core::io::project::ProjectFolder;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            warn: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub struct ProjectSummary<'a> {
    pub folder: &'a ProjectFolder,
    pub cell_count: usize,
    pub trace_columns: usize,
    pub sample_count: usize,
    pub image_size: [usize; 2],
}

pub fn print_project_summary(summary: &ProjectSummary<'_>) {
    let s = Styles::new();
    let folder = summary.folder;

    println!();
    println!("  {}", s.title.apply_to("Curation Project"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Root"), s.path.apply_to(folder.root.display()));
    println!("  {:<14}{}", s.label.apply_to("Data"), s.path.apply_to(folder.data_dir.display()));
    println!();

    println!("  {}", s.header.apply_to("Files"));
    for (label, path) in [
        ("Projection", &folder.projection_path),
        ("Traces", &folder.traces_path),
        ("Props", &folder.props_path),
        ("Contours", &folder.contours_path),
    ] {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("    {:<12}{}", s.label.apply_to(label), s.path.apply_to(name));
    }
    println!();

    println!("  {}", s.header.apply_to("Contents"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Cells"),
        s.value.apply_to(summary.cell_count)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Traces"),
        s.value.apply_to(format!(
            "{} x {} samples",
            summary.trace_columns, summary.sample_count
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Image"),
        s.value
            .apply_to(format!("{}x{}", summary.image_size[0], summary.image_size[1]))
    );

    if summary.trace_columns != summary.cell_count {
        println!();
        println!(
            "  {}",
            s.warn.apply_to(format!(
                "{} cells listed but {} trace columns present",
                summary.cell_count, summary.trace_columns
            ))
        );
    }
    println!();
}
