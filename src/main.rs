// src/main.rs
//
// Calculatrice d’incertitudes : point d’entrée ligne de commande
// ---------------------------------------------------------------
// - Journal : env_logger (RUST_LOG, défaut "warn" ; --verbeux => debug)
// - Erreurs : miette (diagnostics avec code + aide)
// - Tout le calcul vit dans le noyau, l’affichage dans app::vue

use clap::Parser;
use log::LevelFilter;
use miette::Result;

use calculatrice_incertitudes::app::{executer, Cli};

fn installer_journal(verbeux: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbeux {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    installer_journal(cli.verbeux);

    let sortie = executer(cli.commande)?;
    println!("{sortie}");
    Ok(())
}
