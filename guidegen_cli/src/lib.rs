use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render documentation guides and their example projects.",
	long_about = "guidegen turns a directory of guides into the documents and example projects \
	              of a documentation website.\n\nEach guide is a folder with a metadata.json, an \
	              asciidoc document and the sources of its example apps. Every guide is expanded \
	              once per build tool, language and test framework.\n\nQuick start:\n  guidegen \
	              list    Show the guides and their variants\n  guidegen check   Expand every \
	              variant without writing anything\n  guidegen expand  Print one expanded \
	              variant\n  guidegen build   Write the website to a directory"
)]
pub struct GuidegenCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Only process the guide with this slug.
	#[arg(long, short, global = true, env = "GUIDE")]
	pub guide: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// List the guides of the project and the variants each one renders.
	///
	/// Unpublished guides are listed too and marked as drafts.
	List {
		/// Output format.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print the expanded markup of one guide variant.
	///
	/// Requires `--guide`. Without `--build` or `--lang` the first variant of
	/// the guide is expanded.
	Expand {
		/// Build tool of the variant (gradle, gradle_kotlin, maven).
		#[arg(long)]
		build: Option<String>,

		/// Language of the variant (java, groovy, kotlin).
		#[arg(long)]
		lang: Option<String>,

		/// Show a diff against the unexpanded document instead.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// Expand every variant of every guide without writing anything.
	///
	/// Exits with a non-zero status code if any guide fails to expand.
	Check {
		/// Output format.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Render the website into a directory.
	///
	/// Writes one asciidoc document per guide variant and the example code
	/// of every variant below `<output>/code`.
	Build {
		/// Directory to write the website to.
		#[arg(long, short, default_value = "build/site")]
		output: PathBuf,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	Text,
	Json,
}
