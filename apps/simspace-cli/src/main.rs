use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use simspace_catalog::shape_descriptor;
use simspace_commands::{CommandExecutor, CommandQueue, Request, RequestGateway, SpawnRequest};
use simspace_common::EntityKind;
use simspace_kernel::World;

#[derive(Parser)]
#[command(name = "simspace-cli", about = "CLI host for the simspace simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Submit spawn requests from concurrent threads, then step once
    Spawn {
        /// Preset shape (box, sphere, cylinder, capsule, ellipsoid)
        #[arg(short, long, default_value = "box")]
        preset: String,
        /// Number of spawn requests to submit
        #[arg(short, long, default_value = "3")]
        count: usize,
        /// Rename on conflict instead of skipping
        #[arg(short, long)]
        allow_renaming: bool,
        /// Number of submitter threads
        #[arg(short, long, default_value = "4")]
        threads: usize,
    },
    /// Run the scripted end-to-end demo
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("simspace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", simspace_kernel::crate_info());
            println!("commands: {}", simspace_commands::crate_info());
        }
        Commands::Spawn {
            preset,
            count,
            allow_renaming,
            threads,
        } => {
            let Some(descriptor) = shape_descriptor(&preset) else {
                anyhow::bail!("unknown preset {preset:?}");
            };

            let queue = Arc::new(CommandQueue::new());
            let gateway = RequestGateway::new(Arc::clone(&queue));
            let executor = CommandExecutor::new(Arc::clone(&queue));
            let mut world = World::new();

            // Concurrent submitters; every acknowledgment arrives before the
            // step below drains the queue.
            let accepted = AtomicUsize::new(0);
            let submitted = AtomicUsize::new(0);
            std::thread::scope(|scope| {
                for _ in 0..threads.max(1) {
                    scope.spawn(|| {
                        while submitted.fetch_add(1, Ordering::Relaxed) < count {
                            let request = Request::Spawn(SpawnRequest {
                                descriptor: descriptor.clone(),
                                allow_renaming,
                                ..Default::default()
                            });
                            if gateway.submit(request) {
                                accepted.fetch_add(1, Ordering::Relaxed);
                            }
                        }
                    });
                }
            });
            println!(
                "accepted {} of {count} requests, queued {}",
                accepted.load(Ordering::Relaxed),
                queue.len()
            );

            executor.apply(&mut world);
            world.step();

            println!("after step {}: {} entities", world.tick(), world.entity_count());
            for data in world.entities().values() {
                let p = data.pose.position;
                println!("  {} {:24} at ({:.2}, {:.2}, {:.2})", data.kind, data.name, p.x, p.y, p.z);
            }
        }
        Commands::Demo => {
            demo()?;
        }
    }

    Ok(())
}

/// Scripted walk through the command pipeline's contract.
fn demo() -> anyhow::Result<()> {
    let queue = Arc::new(CommandQueue::new());
    let gateway = RequestGateway::new(Arc::clone(&queue));
    let executor = CommandExecutor::new(Arc::clone(&queue));
    let mut world = World::new();

    let spawn = |name: &str, allow_renaming: bool| {
        Request::Spawn(SpawnRequest {
            descriptor: shape_descriptor("box").expect("box is a known preset"),
            name: Some(name.into()),
            allow_renaming,
            ..Default::default()
        })
    };

    println!("-- duplicate name, renaming off: second spawn is skipped");
    gateway.submit(spawn("model A", false));
    gateway.submit(spawn("model A", false));
    run_step(&executor, &mut world);
    println!("   entities: {}", world.entity_count());

    println!("-- duplicate name, renaming on: suffix _0 is assigned");
    gateway.submit(spawn("model B", true));
    gateway.submit(spawn("model B", true));
    run_step(&executor, &mut world);
    let renamed = world.find_by_kind_and_name(EntityKind::Model, "model B_0");
    println!("   model B_0 exists: {}", renamed.is_some());

    println!("-- two distinct spawns queued without stepping: one batch");
    gateway.submit(spawn("acerola", false));
    gateway.submit(spawn("coconut", false));
    run_step(&executor, &mut world);
    println!("   entities: {}", world.entity_count());

    println!("-- spawn a light");
    gateway.submit(Request::Spawn(SpawnRequest {
        descriptor: r#"{"light": {"name": "sun", "type": "directional"}}"#.into(),
        ..Default::default()
    }));
    run_step(&executor, &mut world);

    println!("final state at tick {}:", world.tick());
    for data in world.entities().values() {
        println!("  {} {}", data.kind, data.name);
    }
    for event in world.drain_events() {
        tracing::debug!(?event, "world event");
    }
    Ok(())
}

fn run_step(executor: &CommandExecutor, world: &mut World) {
    // Pre-update phase first, then the rest of the step.
    executor.apply(world);
    world.step();
}
