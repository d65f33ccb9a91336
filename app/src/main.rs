mod demo;
mod logger;

use std::{env, process::ExitCode};

use demo::{Demo, Script};

const DEFAULT_FRAMES: u64 = 120;
const REPORT_EVERY: u64 = 30;

fn main() -> ExitCode {
    let logs = match logger::install(logger::level_from_env()) {
        Ok(receiver) => receiver,
        Err(err) => {
            eprintln!("failed to install logger: {err}");
            return ExitCode::FAILURE;
        }
    };

    let frames = match env::args().nth(1) {
        None => DEFAULT_FRAMES,
        Some(arg) => match arg.parse::<u64>() {
            Ok(frames) => frames,
            Err(err) => {
                eprintln!("invalid frame count `{arg}`: {err}");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut demo = Demo::new();
    let script = Script::default();
    logger::drain(&logs);

    for frame in 0..frames {
        for input in script.inputs_at(frame) {
            demo.handle(input);
        }
        demo.update();
        if frame % REPORT_EVERY == 0 || frame + 1 == frames {
            log::info!("{}", demo.render());
        }
        logger::drain(&logs);
    }

    log::info!(
        "done after {frames} frames: player {} of {} entities",
        demo.player(),
        demo.world().entity_count()
    );
    logger::drain(&logs);
    ExitCode::SUCCESS
}
