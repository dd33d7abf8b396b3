/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;

mod commands;
use commands::{
  batch::BatchArgs, categories::CategoriesArgs, check_config::CheckConfigArgs, value::ValueArgs,
};

mod config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "iv")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// JSON file overriding the built-in engine configuration
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Value one company and print the result as JSON
  Value(ValueArgs),

  /// Value every company in a statement CSV
  Batch(BatchArgs),

  /// Print the category weight and assumption table
  Categories(CategoriesArgs),

  /// Load and validate a configuration file
  CheckConfig(CheckConfigArgs),
}

fn main() -> Result<()> {
  // Load environment variables
  dotenv().ok();

  // Parse CLI arguments
  let cli = Cli::parse();

  // Initialize logging on stderr so JSON output stays clean
  let log_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(log_level).with_writer(std::io::stderr).init();

  // Execute command
  match cli.command {
    Commands::Value(args) => commands::value::execute(args, config::load(cli.config.as_deref())?),
    Commands::Batch(args) => commands::batch::execute(args, config::load(cli.config.as_deref())?),
    Commands::Categories(args) => {
      commands::categories::execute(args, config::load(cli.config.as_deref())?)
    }
    Commands::CheckConfig(args) => commands::check_config::execute(args, cli.config.as_deref()),
  }
}
