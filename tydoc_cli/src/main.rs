use std::path::PathBuf;
use std::process;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tydoc_cli::Commands;
use tydoc_cli::OutputFormat;
use tydoc_cli::TydocCli;
use tydoc_core::Category;
use tydoc_core::CheckResult;
use tydoc_core::DirectorySink;
use tydoc_core::GenerationPhase;
use tydoc_core::GeneratorConfig;
use tydoc_core::ModelFileSource;
use tydoc_core::check_outputs;
use tydoc_core::render_run;
use tydoc_core::write_outputs;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = TydocCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_logging(args.verbose);

	let result = match args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Generate {
			dry_run,
			ref category,
			watch,
		}) => run_generate(&args, dry_run, category.as_deref(), watch),
		Some(Commands::Check {
			diff,
			format,
			watch,
		}) => run_check(&args, diff, format, watch),
		Some(Commands::List) => run_list(&args),
		None => {
			eprintln!("No subcommand specified. Run `tydoc --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<tydoc_core::TydocError>() {
			Ok(tydoc_err) => {
				let report: miette::Report = (*tydoc_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Route log records to stderr so generated output stays clean on stdout.
fn init_logging(verbose: bool) {
	let filter = if verbose {
		tracing_subscriber::EnvFilter::new("tydoc_core=debug,tydoc_cli=debug")
	} else {
		tracing_subscriber::EnvFilter::from_default_env()
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.without_time()
		.try_init()
		.ok();
}

fn resolve_root(args: &TydocCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_init(args: &TydocCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = root.join("tydoc.toml");
	let model_path = root.join("types.json");

	let config_exists = config_path.exists();
	let model_exists = model_path.exists();

	if config_exists {
		println!("Config file already exists: {}", config_path.display());
	} else {
		let sample_config = "# tydoc configuration\n\noutput_directory = \
		                     \"docs/generated\"\nmodels = [\"types.json\"]\n\n[[categories]]\nname \
		                     = \"Reference\"\nincluded_namespaces = [\"MyProject\"]\n\n# Types \
		                     outside your namespaces can still link out to hosted \
		                     docs.\n# [[categories.external_namespaces]]\n# namespace = \
		                     \"System\"\n# link_template = \
		                     \"[{TypeName}](https://learn.microsoft.com/dotnet/api/{TypeNamespace}.\
		                     {TypeRawName})\"\n\n[[categories.sections]]\nname = \
		                     \"Fields\"\nmembers = [\"field\"]\n\n[[categories.sections]]\nname = \
		                     \"Properties\"\nmembers = [\"property\"]\n\n[[categories.sections]]\
		                     \nname = \"Methods\"\nmembers = [\"constructor\", \"method\"]\n";

		std::fs::write(&config_path, sample_config)?;
		println!("Created tydoc.toml");
	}

	if !model_exists {
		let sample_model = "{\n\t\"types\": [\n\t\t{\n\t\t\t\"raw_name\": \
		                    \"Example\",\n\t\t\t\"namespace\": \"MyProject\",\n\t\t\t\"members\": \
		                    [\n\t\t\t\t{\n\t\t\t\t\t\"name\": \"Value\",\n\t\t\t\t\t\"kind\": \
		                    \"property\",\n\t\t\t\t\t\"member_type\": { \"raw_name\": \"Int32\", \
		                    \"namespace\": \"System\" }\n\t\t\t\t}\n\t\t\t]\n\t\t}\n\t]\n}\n";

		std::fs::write(&model_path, sample_model)?;
		println!("Created sample model file: {}", model_path.display());
	}

	if !config_exists {
		println!();
		println!("Next steps:");
		println!("  1. Edit tydoc.toml to describe your categories");
		println!("  2. Export your type descriptions into types.json");
		println!("  3. Run `tydoc generate` to render the docs");
	}

	Ok(())
}

struct ProjectContext {
	root: PathBuf,
	config: GeneratorConfig,
	source: ModelFileSource,
}

fn load_context(args: &TydocCli) -> Result<ProjectContext, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = GeneratorConfig::load_required(&root)?;
	let source = config.source(&root);

	if args.verbose {
		println!(
			"Loaded config: {} model file(s), {} categor(y/ies)",
			config.models.len(),
			config.categories.len()
		);
	}

	Ok(ProjectContext {
		root,
		config,
		source,
	})
}

/// The categories a run covers: all of them, or the single named one.
fn selected_categories<'a>(
	config: &'a GeneratorConfig,
	filter: Option<&str>,
) -> Result<Vec<Category>, Box<dyn std::error::Error>> {
	match filter {
		Some(name) => Ok(vec![config.category(name)?.clone()]),
		None => Ok(config.categories.clone()),
	}
}

fn run_generate(
	args: &TydocCli,
	dry_run: bool,
	category: Option<&str>,
	watch: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	// Run the initial generation.
	run_generate_once(args, dry_run, category)?;

	if !watch || dry_run {
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let root = resolve_root(args);
	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				if matches!(
					event.kind,
					notify::EventKind::Modify(_) | notify::EventKind::Create(_)
				) {
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, generating...");
		if let Err(e) = run_generate_once(args, false, category) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

fn run_generate_once(
	args: &TydocCli,
	dry_run: bool,
	category: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_context(args)?;
	let categories = selected_categories(&ctx.config, category)?;
	let verbose = args.verbose;

	let outputs = render_run(&categories, &ctx.source, |progress| {
		if verbose && matches!(progress.phase, GenerationPhase::Category(_)) {
			println!(
				"  [{:>3.0}%] {}",
				progress.fraction * 100.0,
				progress.message
			);
		}
	});

	let total_files: usize = outputs.iter().map(|output| output.files.len()).sum();
	let total_types: usize = outputs.iter().map(|output| output.type_count).sum();

	if dry_run {
		println!("Dry run: would write {total_files} file(s):");
		for output in &outputs {
			for file in &output.files {
				println!("  {}", file.path.display());
			}
		}
		return Ok(());
	}

	let output_directory = ctx.root.join(&ctx.config.output_directory);
	let report = write_outputs(&outputs, &DirectorySink, &output_directory);

	for path in &report.failed {
		eprintln!(
			"{} could not write {}",
			colored!("warning:", yellow),
			path.display()
		);
	}

	if report.is_ok() && report.written.is_empty() {
		println!("All generated docs are already up to date.");
		return Ok(());
	}

	println!(
		"Generated {} file(s) for {} type(s) in {} categor(y/ies).",
		report.written.len(),
		total_types,
		outputs.len()
	);

	if !report.is_ok() {
		return Err(format!("{} file(s) could not be written", report.failed.len()).into());
	}

	Ok(())
}

fn run_check(
	args: &TydocCli,
	show_diff: bool,
	format: OutputFormat,
	watch: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	// Run the initial check.
	let is_stale = run_check_once(args, show_diff, format)?;

	if !watch {
		if is_stale {
			process::exit(1);
		}
		return Ok(());
	}

	// Watch mode
	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let root = resolve_root(args);
	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				if matches!(
					event.kind,
					notify::EventKind::Modify(_) | notify::EventKind::Create(_)
				) {
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, checking...");
		if let Err(e) = run_check_once(args, show_diff, format) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

/// Run a single check and return whether any output is stale (true = stale).
fn run_check_once(
	args: &TydocCli,
	show_diff: bool,
	format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
	let ctx = load_context(args)?;
	let outputs = render_run(&ctx.config.categories, &ctx.source, |_| {});
	let output_directory = ctx.root.join(&ctx.config.output_directory);
	let result = check_outputs(&outputs, &output_directory);

	if result.is_ok() {
		match format {
			OutputFormat::Json => {
				println!("{{\"ok\":true,\"stale\":[],\"missing\":[]}}");
			}
			OutputFormat::Github => {
				println!("All generated docs are up to date.");
			}
			OutputFormat::Text => {
				println!("Check passed: all generated docs are up to date.");
			}
		}
		return Ok(false);
	}

	match format {
		OutputFormat::Json => {
			let stale_entries: Vec<serde_json::Value> = result
				.stale
				.iter()
				.map(|entry| {
					serde_json::json!({
						"file": entry.path.display().to_string(),
						"current_len": entry.current.len(),
						"expected_len": entry.expected.len(),
					})
				})
				.collect();
			let missing_entries: Vec<serde_json::Value> = result
				.missing
				.iter()
				.map(|path| serde_json::json!(path.display().to_string()))
				.collect();
			let output = serde_json::json!({
				"ok": false,
				"stale": stale_entries,
				"missing": missing_entries,
			});
			println!("{output}");
		}
		OutputFormat::Github => {
			for entry in &result.stale {
				println!(
					"::warning file={}::Generated doc is out of date",
					entry.path.display()
				);
			}
			for path in &result.missing {
				println!("::error file={}::Generated doc is missing", path.display());
			}
			eprintln!("{}", check_summary(&result));
		}
		OutputFormat::Text => {
			eprintln!("Check failed.");
			eprintln!("  stale files: {}", result.stale.len());
			eprintln!("  missing files: {}", result.missing.len());

			if !result.stale.is_empty() {
				eprintln!();
				eprintln!("Stale files:");
				for entry in &result.stale {
					eprintln!("  {}", entry.path.display());

					if show_diff {
						print_diff(&entry.current, &entry.expected);
					}
				}
			}

			if !result.missing.is_empty() {
				eprintln!();
				eprintln!("Missing files:");
				for path in &result.missing {
					eprintln!("  {}", path.display());
				}
			}

			eprintln!();
			eprintln!("{}", check_summary(&result));
		}
	}

	Ok(true)
}

fn check_summary(result: &CheckResult) -> String {
	let mut parts = Vec::new();
	if !result.stale.is_empty() {
		parts.push(format!("{} file(s) are out of date", result.stale.len()));
	}
	if !result.missing.is_empty() {
		parts.push(format!("{} file(s) are missing", result.missing.len()));
	}
	format!("{}. Run `tydoc generate` to fix.", parts.join(" and "))
}

fn run_list(args: &TydocCli) -> Result<(), Box<dyn std::error::Error>> {
	let ctx = load_context(args)?;

	if ctx.config.categories.is_empty() {
		println!("No categories configured.");
		return Ok(());
	}

	let mut total_types = 0;
	for category in &ctx.config.categories {
		let types = category.get_types(&ctx.source);
		total_types += types.len();

		println!(
			"{} ({} type(s)) -> {}",
			colored!(&category.name, bold),
			types.len(),
			category.category_filename()
		);
		for ty in &types {
			println!("  {} -> {}", ty.nice_name(), category.type_filename(ty));
		}
		println!();
	}

	println!(
		"{} categor(y/ies), {} type(s)",
		ctx.config.categories.len(),
		total_types
	);

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
