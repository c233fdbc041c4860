use anyhow::Result;
use clap::{Parser, Subcommand};

use docflow::{
    config, create_lifecycle_span, generate_correlation_id, init_config, init_telemetry, Actor,
    ConsoleReporter, Document, Role, Stage,
};

#[derive(Parser)]
#[command(name = "docflow")]
#[command(about = "Role-gated document lifecycle demonstration")]
#[command(
    long_about = "Docflow walks a document through Draft, Moderation, Published and Archived, \
                  with per-stage permission checks for authors, moderators and admins. Run \
                  'docflow demo' for the scripted walkthrough."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted lifecycle walkthrough
    Demo {
        /// Print status snapshots as JSON
        #[arg(long, help = "Render status snapshots as JSON instead of plain text")]
        json: bool,
    },
    /// Print the stage × action permission table
    Matrix,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_config()?;
    init_telemetry(&config()?.observability)?;

    match cli.command {
        None => show_overview(),
        Some(Commands::Demo { json }) => demo_command(json),
        Some(Commands::Matrix) => matrix_command(),
    }
}

fn show_overview() -> Result<()> {
    println!("📋 DOCFLOW — Role-Gated Document Lifecycle");
    println!();
    println!("A document moves through four stages:");
    println!();
    println!("    Draft → Moderation → Published");
    println!("      ↑         |            |");
    println!("      └─ reject ┘ unpublish ─┘");
    println!("      (any live stage → Archived, admin only)");
    println!();
    println!("Who may do what:");
    println!("  ✍️  Author    - edit their own draft, request review");
    println!("  👀 Moderator - approve documents under moderation");
    println!("  🔑 Admin     - approve, reject, unpublish, archive");
    println!();
    println!("📊 Quick start:");
    println!("  docflow demo     # scripted walkthrough with per-action reports");
    println!("  docflow matrix   # full stage × action permission table");
    Ok(())
}

fn demo_command(json: bool) -> Result<()> {
    let cfg = config()?;
    let correlation_id = generate_correlation_id();
    let span = create_lifecycle_span("demo", "Alice", Some(&correlation_id));
    let _guard = span.enter();

    let author = Actor::new(Role::Author, "Alice");
    let rogue_author = Actor::new(Role::Author, "Bob");
    let moderator = Actor::new(Role::Moderator, "Charlie");
    let admin = Actor::new(Role::Admin, "Dave");

    println!("📄 DOCFLOW DEMO — one document, start to finish");
    println!();

    let mut doc = Document::with_options(
        "Alice",
        Box::new(ConsoleReporter),
        cfg.workflow.preview_chars,
    );
    print_status(&doc, json)?;

    println!();
    println!("-- Drafting --");
    doc.set_content("draft text", author.clone());
    doc.request_review(author.clone());
    print_status(&doc, json)?;

    println!();
    println!("-- Under moderation --");
    doc.set_content("x", author.clone()); // content is frozen now
    doc.approve(rogue_author); // wrong role
    doc.approve(moderator);
    print_status(&doc, json)?;

    println!();
    println!("-- Published, then pulled back --");
    doc.unpublish(admin.clone());
    print_status(&doc, json)?;

    println!();
    println!("-- Archiving --");
    doc.archive(admin.clone());
    doc.set_content("zombie edit", author); // everything is refused now
    doc.archive(admin); // repeat is informational
    print_status(&doc, json)?;

    Ok(())
}

fn print_status(doc: &Document, json: bool) -> Result<()> {
    let status = doc.status();
    if json {
        println!("{}", serde_json::to_string(&status)?);
    } else {
        println!("{status}");
    }
    Ok(())
}

fn matrix_command() -> Result<()> {
    println!("Stage × action permission table (guard → resulting stage):");
    println!();
    let rows: [(Stage, [&str; 6]); 4] = [
        (
            Stage::Draft,
            [
                "author only → Draft",
                "author only → Moderation",
                "denied",
                "denied",
                "denied",
                "Admin → Archived",
            ],
        ),
        (
            Stage::Moderation,
            [
                "denied",
                "denied",
                "Moderator/Admin → Published",
                "Admin → Draft",
                "denied",
                "Admin → Archived",
            ],
        ),
        (
            Stage::Published,
            [
                "denied",
                "denied",
                "denied",
                "denied",
                "Admin → Draft",
                "Admin → Archived",
            ],
        ),
        (
            Stage::Archived,
            [
                "denied",
                "denied",
                "denied",
                "denied",
                "denied",
                "no-op (informational)",
            ],
        ),
    ];

    for (stage, cells) in rows {
        println!("{stage}:");
        for (action, cell) in docflow::ActionKind::ALL.iter().zip(cells) {
            println!("  {:<15} {cell}", action.name());
        }
        println!();
    }
    println!("'author only' means role Author and a name matching the document's author.");
    Ok(())
}
