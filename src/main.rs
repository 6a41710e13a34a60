use beattickrs::{
    cli::format_unit_list, config::Settings, event_loop::EventLoop, logging, Args, BeatCatalog,
    Metronome,
};
use clap::Parser;

fn main() {
    let args = parse_command_line_arguments();

    if args.list_units {
        list_beat_units();
        return;
    }

    let settings = load_settings(&args);
    initialize_logging(&settings.log_level);

    let metronome = match Metronome::from_settings(&settings) {
        Ok(metronome) => metronome,
        Err(e) => exit_with_error(&format!("Error configuring metronome: {}", e)),
    };

    run_metronome(metronome, args.beats);
}

fn parse_command_line_arguments() -> Args {
    Args::parse()
}

fn list_beat_units() {
    println!("Available beat units:");
    for line in format_unit_list(&BeatCatalog::standard()) {
        println!("  {}", line);
    }
}

fn load_settings(args: &Args) -> Settings {
    match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings.apply_args(args),
        Err(e) => exit_with_error(&format!("Error loading settings: {}", e)),
    }
}

fn initialize_logging(level: &str) {
    if let Err(e) = logging::init_logger(level) {
        eprintln!("Logging disabled: {}", e);
        return;
    }
    log::info!("Application starting");
}

fn run_metronome(mut metronome: Metronome, beats: Option<u64>) {
    println!(
        "{} BPM, {} beats per measure, beat unit {} {} ({:.1} ms)",
        metronome.tempo(),
        metronome.beats_per_measure(),
        metronome.beat_unit().glyph,
        metronome.beat_unit().label,
        metronome.beat_duration().as_secs_f64() * 1000.0
    );

    if let Err(e) = metronome.start() {
        exit_with_error(&format!("Error starting metronome: {}", e));
    }

    let mut event_loop = EventLoop::new(metronome);
    let result = event_loop.run(beats, |beat, _spacing| {
        let marker = if beat.downbeat { "*" } else { " " };
        println!(
            "{} {} measure {:>4} beat {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            marker,
            beat.measure,
            beat.beat
        );
    });

    let metronome = event_loop.into_inner();
    match result {
        Ok(count) => log::info!("Delivered {} beats", count),
        Err(e) => exit_with_error(&format!("Metronome stopped unexpectedly: {}", e)),
    }

    if let Err(e) = metronome.shutdown() {
        log::error!("Error shutting down metronome: {}", e);
    }
}

fn exit_with_error(message: &str) -> ! {
    log::error!("{}", message);
    eprintln!("{}", message);
    std::process::exit(1);
}
