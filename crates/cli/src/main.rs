//! atmark demo: mention autocompletion over a flat buffer in the terminal.
//!
//! Each input line is fed to the controller one character at a time, as a
//! host surface would on keystrokes; suggestions print under their anchor
//! coordinates. Colon commands drive the runtime API.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use atmark_engine::{Anchor, Candidate, MentionConfig, Mentions, SuggestionView};
use atmark_surface::{FlatBuffer, MonospaceGeometry, TextModel};
use clap::Parser;
use tracing::info;

/// Demo command line arguments.
#[derive(Parser, Debug)]
#[command(name = "atmark")]
#[command(about = "Interactive mention autocompletion demo")]
struct Args {
	/// TOML config file (candidates, trigger, thresholds)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

/// Prints the suggestion list at its anchor coordinates.
#[derive(Default)]
struct TermView {
	visible: bool,
}

impl SuggestionView for TermView {
	fn show(&mut self, candidates: &[Candidate], anchor: Anchor) {
		self.visible = true;
		println!("  suggestions at ({:.0},{:.0}):", anchor.top, anchor.left);
		for (index, candidate) in candidates.iter().enumerate() {
			match candidate.match_score {
				Some(score) => println!("    [{index}] {}  ({score:.2})", candidate.display),
				None => println!("    [{index}] {}", candidate.display),
			}
		}
	}

	fn hide(&mut self) {
		if self.visible {
			println!("  (suggestions hidden)");
		}
		self.visible = false;
	}

	fn teardown(&mut self) {
		self.visible = false;
	}
}

fn load_config(args: &Args) -> Result<MentionConfig, Box<dyn std::error::Error>> {
	let mut config = match &args.config {
		Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
		None => MentionConfig {
			candidates: vec![
				Candidate::new("Alice", "Alice"),
				Candidate::new("Albert", "Albert"),
				Candidate::new("Bob", "Bob"),
			],
			..Default::default()
		},
	};
	config.verbose = args.verbose;
	Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	let config = load_config(&args)?;
	let trigger = config.trigger;
	let mut controller = Mentions::new(
		FlatBuffer::new(""),
		Box::new(TermView::default()),
		Box::new(MonospaceGeometry::default()),
		config,
	);

	info!(%trigger, "demo ready");
	println!("type text; commands: :select N | :add DISPLAY KEY | :rm KEY | :buf | :quit");

	prompt()?;
	for line in io::stdin().lock().lines() {
		let line = line?;
		if !handle_line(&mut controller, line.trim_end()) {
			break;
		}
		// Give debounced fetches a chance to fire and land.
		tokio::task::yield_now().await;
		controller.pump();
		prompt()?;
	}

	controller.destroy();
	Ok(())
}

fn prompt() -> io::Result<()> {
	print!("> ");
	io::stdout().flush()
}

/// Returns false when the session should end.
fn handle_line(controller: &mut Mentions<FlatBuffer>, line: &str) -> bool {
	let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
	match command {
		":quit" => return false,
		":buf" => {
			let model = controller.model();
			println!("  {:?} (caret {})", model.value(), model.caret());
		}
		":select" => match rest.trim().parse::<usize>() {
			Ok(index) => {
				controller.select(index);
				println!("  -> {:?}", controller.model().value());
			}
			Err(_) => println!("  usage: :select N"),
		},
		":add" => match rest.trim().split_once(' ') {
			Some((display, key)) => {
				controller.add_candidate(Candidate::new(display, key));
				println!("  added {display} ({key})");
			}
			None => println!("  usage: :add DISPLAY KEY"),
		},
		":rm" => {
			let key = rest.trim();
			controller.remove_candidate(key);
			println!("  removed all candidates with key {key}");
		}
		_ => {
			// Plain text: type it character by character.
			let mut scratch = [0u8; 4];
			for ch in line.chars() {
				controller.model_mut().insert(ch.encode_utf8(&mut scratch));
				controller.on_input();
			}
			let before = controller.model().text_before_caret().unwrap_or_default();
			println!("  buffer: {before:?}");
		}
	}
	true
}
