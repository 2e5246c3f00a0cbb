#![deny(clippy::all)]
use std::io::{stdout, BufWriter};
use std::process::ExitCode;
use std::rc::Rc;

use hexitch::config::{self, Config, Invocation, USAGE};
use hexitch::hex_view::view::{restore_terminal, HexView};
use hexitch::logging::init_tracing;
use hexitch::{AddressSpace, Decoder, IcedDecoder, Session, Viewport};
use tracing::{error, info};

const STDOUT_BUF: usize = 8192;

/// Hands the terminal back before the panic message is printed.
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout());
        original_hook(panic_info);
    }));
}

fn run(config: Config) -> hexitch::Result<()> {
    let space = AddressSpace::open(&config.path)?;
    let decoder: Rc<dyn Decoder> = Rc::new(IcedDecoder::new(config.bitness)?);
    let (_, height) = crossterm::terminal::size()?;

    info!(
        path = %config.path.display(),
        size = space.size(),
        mode = ?config.mode,
        start = config.start,
        bitness = config.bitness,
        "starting"
    );

    let session = Session::new(
        space,
        decoder,
        config.mode,
        config.start,
        Viewport::rows_for_height(height),
    )?;

    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(STDOUT_BUF, stdout.lock());
    HexView::with_session(session).run_event_loop(&mut stdout)
}

fn main() -> ExitCode {
    let invocation = match config::parse_args(std::env::args()) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("hexitch: {}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let config = match invocation {
        Invocation::Help => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Invocation::Version => {
            println!("hexitch {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Invocation::View(config) => config,
    };

    init_tracing(config::log_path().as_deref());
    setup_panic_hook();

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal");
            eprintln!("hexitch: {}", e);
            ExitCode::from(1)
        }
    }
}
