use crate::{
    deck::{format_file_size, DeckGenerator, DeckSession, TemplateKind},
    Agent, RuntimeConfig, TurnResult,
};
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

const GUIDE: &str = "Help & Documentation:

1. Input your content: Paste any text, markdown, or prose
2. Configure AI: Enter your API key for content processing
3. Upload template: Provide a PowerPoint file for styling
4. Generate: Create your presentation automatically

Features:
- Intelligent slide structure detection
- Template style preservation
- Speaker notes generation
- Multiple presentation formats
- Real-time preview";

const PRIVACY: &str = "Privacy Policy:

• Your API keys are never stored
• Content is processed temporarily and not saved
• No personal data is collected or transmitted
• All processing happens locally
• Template files are used only for their name and size

This application respects your privacy and data security.";

/// CLI entry point for the agent-deck tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();
    let config = RuntimeConfig::from_env()?;

    match matches.subcommand() {
        Some(("chat", sub)) => run_chat(config, sub).await?,
        Some(("deck", sub)) => run_deck(config, sub).await?,
        Some(("guide", _)) => println!("{}", GUIDE),
        Some(("privacy", _)) => println!("{}", PRIVACY),
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

fn command() -> Command {
    let seed = Arg::new("seed")
        .long("seed")
        .value_name("SEED")
        .value_parser(clap::value_parser!(u64))
        .help("Seed the simulated randomness (or set AGENT_DECK_SEED)");
    let no_pacing = Arg::new("no-pacing")
        .long("no-pacing")
        .action(ArgAction::SetTrue)
        .help("Skip the artificial delays (or set AGENT_DECK_PACING=off)");

    Command::new("agent-deck")
        .version("0.1.0")
        .about("Mock tool-routing chat agent and text-to-PowerPoint generator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("chat")
                .about("Send a message to the mock agent, or chat interactively")
                .arg(
                    Arg::new("prompt")
                        .help("Message for the agent; omit for an interactive session")
                        .index(1),
                )
                .arg(seed.clone())
                .arg(no_pacing.clone())
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(ArgAction::SetTrue)
                        .help("Print the step trace of each turn"),
                )
                .arg(
                    Arg::new("stats")
                        .long("stats")
                        .action(ArgAction::SetTrue)
                        .help("Print tool metrics on exit"),
                ),
        )
        .subcommand(
            Command::new("deck")
                .about("Turn text into a PowerPoint presentation")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .required(true)
                        .help("Text file to convert, or - for stdin"),
                )
                .arg(
                    Arg::new("guidance")
                        .short('g')
                        .long("guidance")
                        .value_name("TEXT")
                        .help("How the content should be presented"),
                )
                .arg(
                    Arg::new("provider")
                        .short('p')
                        .long("provider")
                        .value_name("PROVIDER")
                        .value_parser(["openai", "google", "nvidia"])
                        .help("AI provider (or set AGENT_DECK_PROVIDER)"),
                )
                .arg(
                    Arg::new("api-key")
                        .short('k')
                        .long("api-key")
                        .value_name("KEY")
                        .help("Provider API key (or set AGENT_DECK_API_KEY / OPENAI_API_KEY)"),
                )
                .arg(
                    Arg::new("template")
                        .short('t')
                        .long("template")
                        .value_name("KIND|PATH")
                        .default_value("corporate")
                        .help("corporate, modern, minimal, creative, or a .pptx/.potx file"),
                )
                .arg(
                    Arg::new("slides")
                        .short('n')
                        .long("slides")
                        .value_name("COUNT")
                        .value_parser(clap::value_parser!(usize))
                        .help("Slide count, clamped to 3..=20"),
                )
                .arg(
                    Arg::new("notes")
                        .long("notes")
                        .action(ArgAction::SetTrue)
                        .help("Generate speaker notes"),
                )
                .arg(
                    Arg::new("out")
                        .short('o')
                        .long("out")
                        .value_name("DIR")
                        .help("Output directory (or set AGENT_DECK_OUTPUT_DIR)"),
                )
                .arg(
                    Arg::new("preview")
                        .long("preview")
                        .action(ArgAction::SetTrue)
                        .help("Print a text preview of every slide"),
                )
                .arg(
                    Arg::new("analysis")
                        .long("analysis")
                        .value_name("FILE")
                        .help("Provider answer to take the slide count and topics from"),
                )
                .arg(seed)
                .arg(no_pacing),
        )
        .subcommand(Command::new("guide").about("Show how the deck wizard works"))
        .subcommand(Command::new("privacy").about("Show the privacy policy"))
}

fn apply_overrides(config: RuntimeConfig, matches: &ArgMatches) -> RuntimeConfig {
    let config = config.with_seed(matches.get_one::<u64>("seed").copied());
    if matches.get_flag("no-pacing") {
        config.with_pacing(false)
    } else {
        config
    }
}

async fn run_chat(config: RuntimeConfig, matches: &ArgMatches) -> anyhow::Result<()> {
    let config = apply_overrides(config, matches);
    let trace = matches.get_flag("trace");
    let mut agent = Agent::from_config(&config);

    match matches.get_one::<String>("prompt") {
        Some(prompt) => {
            info!("Running agent with prompt: {}", prompt);
            match agent.handle_message(prompt).await {
                Ok(turn) => print_turn(&turn, trace),
                Err(e) => {
                    error!("Agent turn failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            println!("Agent ready. Type a message, or 'exit' to quit.");
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    break;
                }
                match agent.handle_message(line).await {
                    Ok(turn) => print_turn(&turn, trace),
                    Err(e) => eprintln!("{}", e),
                }
            }
        }
    }

    if matches.get_flag("stats") {
        let insights = agent.insights();
        println!(
            "\nTool metrics:\n{}",
            serde_json::to_string_pretty(&insights.metrics.all_stats())?
        );
        println!(
            "\nPerformance:\n{}",
            serde_json::to_string_pretty(&insights.performance.report())?
        );
    }

    Ok(())
}

fn print_turn(turn: &TurnResult, trace: bool) {
    println!("\nAgent:\n{}", turn.reply);
    if trace {
        println!("\n{}", turn.replay());
    }
}

fn read_input(source: &str) -> std::io::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(source)
    }
}

async fn run_deck(config: RuntimeConfig, matches: &ArgMatches) -> anyhow::Result<()> {
    let config = apply_overrides(config, matches);
    let mut session = DeckSession::new();

    // Step 1: content
    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or("-");
    let text = read_input(input).with_context(|| format!("Failed to read content from {}", input))?;
    session.set_text(text);
    session.next_step(2)?;

    // Step 2: AI settings
    if let Some(guidance) = matches.get_one::<String>("guidance") {
        session.set_guidance(guidance.as_str());
    }
    let provider = match matches.get_one::<String>("provider") {
        Some(raw) => raw.parse()?,
        None => config.provider,
    };
    session.set_provider(provider);
    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| config.api_key.clone())
        .unwrap_or_default();
    session.set_api_key(api_key);
    session.set_slide_count(matches.get_one::<usize>("slides").copied());
    session.set_generate_notes(matches.get_flag("notes"));
    if let Some(path) = matches.get_one::<String>("analysis") {
        let answer = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read provider answer from {}", path))?;
        session.set_provider_response(Some(answer));
    }
    session.next_step(3)?;

    // Step 3: template
    let template = matches
        .get_one::<String>("template")
        .map(String::as_str)
        .unwrap_or("corporate");
    match template.parse::<TemplateKind>() {
        Ok(kind) => session.select_sample_template(kind),
        Err(_) => session.upload_template_file(Path::new(template))?,
    }
    session.next_step(4)?;

    println!("{}\n", session.summary());

    let mut generator = DeckGenerator::new(config.pacer());
    if let Some(seed) = config.seed {
        generator = generator.with_seed(seed);
    }
    let presentation = generator
        .generate_with_progress(&mut session, |stage| {
            println!("[{:>3}%] {}", stage.percent(), stage.message())
        })
        .await?;

    let out_dir = matches
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.output_dir.clone());
    let path = presentation
        .save_to(&out_dir)
        .with_context(|| format!("Failed to save presentation to {}", out_dir.display()))?;
    println!(
        "\nSaved {} slides to {} ({})",
        presentation.slide_count,
        path.display(),
        format_file_size(presentation.size())
    );

    if matches.get_flag("preview") {
        let mut preview = session.preview();
        loop {
            println!("\n{}", preview.render());
            if !preview.has_next() {
                break;
            }
            preview.next();
        }
    }

    Ok(())
}
