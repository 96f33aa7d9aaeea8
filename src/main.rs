use std::process;

use tracing::error;

use zypstrap::executor::RealCommandExecutor;

fn main() {
    let args = zypstrap::cli::parse_args();

    if let Err(e) = zypstrap::init_logging(args.log_level) {
        eprintln!("{}", e);
        process::exit(1);
    }

    let request = args.into_request();
    let executor = RealCommandExecutor {
        dry_run: request.dry_run,
    };

    if let Err(e) = zypstrap::run(&request, &executor) {
        error!("{:#}", e);
        process::exit(1);
    }
}
