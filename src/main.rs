use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kira_progression::cli::{Cli, Commands};
use kira_progression::ctx::Ctx;
use kira_progression::io;
use kira_progression::model::ModelParams;
use kira_progression::pipeline::Pipeline;
use kira_progression::pipeline::stage0_scaffold::Stage0Scaffold;
use kira_progression::pipeline::stage1_input::Stage1Input;
use kira_progression::pipeline::stage2_preprocess::Stage2Preprocess;
use kira_progression::pipeline::stage3_futures::Stage3Futures;
use kira_progression::pipeline::stage4_train::Stage4Train;
use kira_progression::pipeline::stage5_forecast::Stage5Forecast;
use kira_progression::pipeline::stage6_output::Stage6Output;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast(args) => {
            let params = ModelParams {
                max_iterations: args.max_iter,
            };
            let mut ctx = Ctx::new(
                args.train,
                args.input,
                args.out,
                args.as_of,
                args.json,
                args.tsv,
                params,
                env!("CARGO_PKG_VERSION"),
            );

            let pipeline = Pipeline::new(vec![
                Box::new(Stage0Scaffold::new()),
                Box::new(Stage1Input::new()),
                Box::new(Stage2Preprocess::new()),
                Box::new(Stage3Futures::new()),
                Box::new(Stage4Train::new()),
                Box::new(Stage5Forecast::new()),
                Box::new(Stage6Output::new()),
            ]);
            pipeline.run(&mut ctx)?;

            print_summary(&ctx)?;
        }
        Commands::Validate(args) => {
            let mut ctx = Ctx::new(
                args.input,
                None,
                PathBuf::from("."),
                None,
                false,
                false,
                ModelParams::default(),
                env!("CARGO_PKG_VERSION"),
            );

            let pipeline = Pipeline::new(vec![
                Box::new(Stage1Input::new()),
                Box::new(Stage2Preprocess::new()),
                Box::new(Stage3Futures::new()),
            ]);
            pipeline.run(&mut ctx)?;

            print_validate_summary(&ctx);
        }
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    print_warnings(ctx);
    Ok(())
}

fn print_validate_summary(ctx: &Ctx) {
    println!("kira-progression validate ok");
    if let Some(raw) = &ctx.raw_train {
        println!("rows: {}", raw.len());
    }
    if let Some(canonical) = &ctx.canonical {
        println!("visits: {}", canonical.len());
        println!("patients: {}", canonical.patient_count());
    }
    if let Some(pairs) = &ctx.pairs {
        println!("pairs: {}", pairs.len());
    }
    print_warnings(ctx);
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}
