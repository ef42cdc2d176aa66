use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use guidegen_cli::Commands;
use guidegen_cli::GuidegenCli;
use guidegen_cli::OutputFormat;
use guidegen_core::BuildTool;
use guidegen_core::CheckReport;
use guidegen_core::Guide;
use guidegen_core::GuidesConfig;
use guidegen_core::GuidesError;
use guidegen_core::Language;
use guidegen_core::ManifestGenerator;
use guidegen_core::PassthroughConverter;
use guidegen_core::WebsiteGenerator;
use guidegen_core::check_guides;
use guidegen_core::expand_guide;
use guidegen_core::load_guides;
use guidegen_core::macros::MacroPipeline;
use guidegen_core::read_document;
use guidegen_core::render_options;
use guidegen_core::select_option;
use miette::Diagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

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

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
	let args = GuidegenCli::parse();

	// Respect NO_COLOR, --no-color and terminals without color support.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
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

	init_tracing(args.verbose);

	let result = match &args.command {
		Some(Commands::List { format }) => run_list(&args, *format),
		Some(Commands::Expand { build, lang, diff }) => {
			run_expand(&args, build.as_deref(), lang.as_deref(), *diff)
		}
		Some(Commands::Check { format }) => {
			match run_check(&args, *format) {
				Ok(true) => process::exit(1),
				Ok(false) => Ok(()),
				Err(e) => Err(e),
			}
		}
		Some(Commands::Build { output }) => {
			match run_build(&args, output) {
				Ok(true) => process::exit(1),
				Ok(false) => Ok(()),
				Err(e) => Err(e),
			}
		}
		None => {
			eprintln!("No subcommand specified. Run `guidegen --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<GuidesError>() {
			Ok(guides_err) => {
				let report: miette::Report = (*guides_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr, filtered by `RUST_LOG` or by `--verbose`.
fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
		.ok();
}

fn resolve_root(args: &GuidegenCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Everything a command needs to know about the project.
struct ProjectContext {
	root: PathBuf,
	config: GuidesConfig,
	jdk: u32,
}

fn load_context(args: &GuidegenCli) -> Result<ProjectContext, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let mut config = GuidesConfig::load_or_default(&root)?;
	if let Some(guide) = &args.guide {
		config.single_guide = Some(guide.clone());
	}
	let jdk = config.resolve_jdk_version()?;

	if args.verbose {
		match GuidesConfig::resolve_path(&root) {
			Some(path) => eprintln!("Using config {}", path.display()),
			None => eprintln!("No config file found, using defaults"),
		}
		eprintln!("Resolved JDK {jdk}");
	}

	Ok(ProjectContext { root, config, jdk })
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

#[derive(Serialize)]
struct GuideSummary<'a> {
	slug: &'a str,
	title: &'a str,
	publish: bool,
	variants: Vec<String>,
}

fn run_list(args: &GuidegenCli, format: OutputFormat) -> CliResult {
	let ctx = load_context(args)?;
	let guides = load_guides(&ctx.root, &ctx.config)?;
	let selected: Vec<&Guide> = guides
		.iter()
		.filter(|guide| {
			ctx.config
				.single_guide
				.as_deref()
				.is_none_or(|slug| slug == guide.slug)
		})
		.collect();

	let summaries: Vec<GuideSummary<'_>> = selected
		.iter()
		.map(|guide| {
			GuideSummary {
				slug: &guide.slug,
				title: &guide.title,
				publish: guide.publish,
				variants: render_options(guide)
					.iter()
					.map(ToString::to_string)
					.collect(),
			}
		})
		.collect();

	if let OutputFormat::Json = format {
		println!("{}", serde_json::to_string(&summaries)?);
		return Ok(());
	}

	if summaries.is_empty() {
		println!("No guides found.");
		return Ok(());
	}

	println!("{}", colored!("Guides:", bold));
	for summary in &summaries {
		let draft = if summary.publish { "" } else { " [draft]" };
		println!(
			"  {} {} ({} variant(s)){draft}",
			summary.slug,
			summary.title,
			summary.variants.len()
		);
		for variant in &summary.variants {
			println!("    {variant}");
		}
	}

	println!("\n{} guide(s)", summaries.len());

	Ok(())
}

fn run_expand(
	args: &GuidegenCli,
	build: Option<&str>,
	lang: Option<&str>,
	diff: bool,
) -> CliResult {
	let Some(slug) = args.guide.as_deref() else {
		return Err("`expand` requires `--guide <SLUG>`".into());
	};

	let ctx = load_context(args)?;
	let guides = load_guides(&ctx.root, &ctx.config)?;
	let guide = guides
		.iter()
		.find(|guide| guide.slug == slug)
		.ok_or_else(|| GuidesError::UnknownGuide(slug.to_string()))?;

	let build_tool = build.map(str::parse::<BuildTool>).transpose()?;
	let language = lang.map(str::parse::<Language>).transpose()?;
	let option = select_option(guide, build_tool, language)?;

	let pipeline = MacroPipeline::with_defaults(&ctx.config, ctx.jdk);
	let expanded = expand_guide(guide, option, &pipeline, None)?;

	if diff {
		let source = read_document(guide)?;
		println!("{}", colored!(format!("{slug} ({option})"), bold));
		print_diff(&source, &expanded);
	} else {
		print!("{expanded}");
	}

	Ok(())
}

/// Returns `true` when at least one guide failed.
fn run_check(args: &GuidegenCli, format: OutputFormat) -> Result<bool, Box<dyn std::error::Error>> {
	let ctx = load_context(args)?;
	let guides = load_guides(&ctx.root, &ctx.config)?;
	let pipeline = MacroPipeline::with_defaults(&ctx.config, ctx.jdk);
	let report = check_guides(&guides, &pipeline, &ctx.config, ctx.jdk);

	match format {
		OutputFormat::Json => print_check_json(&report),
		OutputFormat::Text => print_check_text(&report),
	}

	Ok(!report.is_ok())
}

fn print_check_json(report: &CheckReport) {
	let passed: Vec<serde_json::Value> = report
		.passed
		.iter()
		.map(|(slug, variants)| {
			serde_json::json!({
				"guide": slug,
				"variants": variants,
			})
		})
		.collect();
	let failures: Vec<serde_json::Value> = report
		.failures
		.iter()
		.map(|failure| {
			serde_json::json!({
				"guide": failure.slug,
				"message": failure.error.to_string(),
			})
		})
		.collect();
	let output = serde_json::json!({
		"ok": report.is_ok(),
		"passed": passed,
		"failures": failures,
	});
	println!("{output}");
}

fn print_check_text(report: &CheckReport) {
	if report.is_ok() {
		let variants: usize = report.passed.iter().map(|(_, variants)| variants).sum();
		println!(
			"Check passed: {} guide(s), {variants} variant(s) expanded.",
			report.passed.len()
		);
		return;
	}

	eprintln!("Check failed.");
	eprintln!("  passed guides: {}", report.passed.len());
	eprintln!("  failed guides: {}", report.failures.len());
	eprintln!();
	eprintln!("Failures:");
	for failure in &report.failures {
		eprintln!(
			"  {} {}: {}",
			colored!("✗", red),
			failure.slug,
			failure.error
		);
	}
}

/// Returns `true` when at least one guide failed.
fn run_build(args: &GuidegenCli, output: &Path) -> Result<bool, Box<dyn std::error::Error>> {
	let ctx = load_context(args)?;
	let output = if output.is_absolute() {
		output.to_path_buf()
	} else {
		ctx.root.join(output)
	};

	let website = WebsiteGenerator::new(
		&ctx.config,
		&PassthroughConverter,
		&ManifestGenerator,
		ctx.jdk,
	);
	let report = website.generate(&ctx.root, &output)?;

	if !report.rendered.is_empty() {
		println!("{}", colored!("Rendered:", bold));
		for path in &report.rendered {
			println!("  {} {}", colored!("✓", green), path.display());
		}
	}

	if !report.skipped.is_empty() {
		print_section("Skipped:");
		for slug in &report.skipped {
			println!("  {} {slug}", colored!("-", yellow));
		}
	}

	if !report.failures.is_empty() {
		print_section("Failed:");
		for failure in &report.failures {
			let diagnostic: miette::Report = clone_error(&failure.error).into();
			eprintln!("  {} {}", colored!("✗", red), failure.slug);
			eprintln!("{diagnostic:?}");
		}
	}

	println!(
		"\n{} document(s) written to {}, {} skipped, {} failed",
		report.rendered.len(),
		output.display(),
		report.skipped.len(),
		report.failures.len()
	);

	Ok(!report.failures.is_empty())
}

/// Rebuild a diagnostic for display, keeping its code and help text.
fn clone_error(error: &GuidesError) -> miette::MietteDiagnostic {
	let mut diagnostic = miette::MietteDiagnostic::new(error.to_string());
	if let Some(code) = error.code() {
		diagnostic = diagnostic.with_code(code.to_string());
	}
	if let Some(help) = error.help() {
		diagnostic = diagnostic.with_help(help.to_string());
	}
	diagnostic
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("{}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("{}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!(" {change}");
			}
		}
	}
}
