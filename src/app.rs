// src/app.rs
//
// Appelant ligne de commande du noyau.
//
// Rôle:
// - Déclarer les sous-modules (etat.rs = arguments, vue.rs = rendu texte)
// - Convertir les arguments en appels au noyau
// - Seul endroit qui lit/écrit des fichiers

pub mod etat;
pub mod vue;

pub use etat::{Cli, Commande};

use std::fs;

use miette::{IntoDiagnostic, Result, WrapErr};

use crate::noyau::arrondi::arrondir_decimal;
use crate::noyau::erreur::ErreurIncertitude;
use crate::noyau::fichier::Configuration;
use crate::noyau::format::formater_resultat;
use crate::noyau::formules::{
    incertitude_b_depuis_limite, lire_facteur_lecture, mesure_multiple, mesure_unique,
    mesure_unique_regle, Instrument,
};
use crate::noyau::saisie::lire_liste_reels;

use etat::{ArgsA, ArgsPropager, ArgsUnique};

/// Exécute une commande et renvoie le texte à afficher.
pub fn executer(commande: Commande) -> Result<String> {
    let sortie = match commande {
        Commande::B(args) => {
            let i = args.instrument;
            let u_b = incertitude_b_depuis_limite(i.limite, i.distribution);
            vue::rendu_type_b(u_b, i.distribution)
        }
        Commande::A(args) => executer_a(args)?,
        Commande::Unique(args) => executer_unique(args)?,
        Commande::Propager(args) => executer_propager(args)?,
        Commande::Formater(args) => formater_resultat(args.valeur, args.incertitude).to_string(),
        Commande::Arrondir(args) => arrondir_decimal(args.x, args.decimales)?.to_string(),
    };
    Ok(sortie)
}

fn executer_a(args: ArgsA) -> Result<String> {
    let donnees = lire_liste_reels(&args.donnees.join(" "))?;
    let i = args.instrument;

    let m = mesure_multiple(&donnees, args.facteur_t, i.limite, i.distribution)?;

    Ok(vue::rendu_mesures_repetees(donnees.len(), &m))
}

fn executer_unique(args: ArgsUnique) -> Result<String> {
    let instrument = Instrument {
        division: args.division,
        facteur_lecture: lire_facteur_lecture(&args.lecture)?,
        limite: args.instrument.limite,
        distribution: args.instrument.distribution,
    };

    let r = match (args.valeur, args.regle.as_deref()) {
        (_, Some(&[l1, l2])) => mesure_unique_regle(l1, l2, &instrument),
        (Some(v), _) => mesure_unique(v, &instrument),
        _ => {
            return Err(ErreurIncertitude::ArgumentInvalide(
                "--valeur ou --regle V1 V2 attendu".into(),
            )
            .into())
        }
    };

    Ok(vue::ligne_resultat("x", &r))
}

/// "10,0.1" -> (10, 0.1)
fn lire_couple(texte: &str) -> Result<(f64, f64), ErreurIncertitude> {
    match lire_liste_reels(texte)?[..] {
        [v, u] => Ok((v, u)),
        _ => Err(ErreurIncertitude::ArgumentInvalide(format!(
            "grandeur \"{texte}\": attendu 'valeur,incertitude'"
        ))),
    }
}

fn executer_propager(args: ArgsPropager) -> Result<String> {
    let cfg = match &args.fichier {
        Some(chemin) => {
            let texte = fs::read_to_string(chemin)
                .into_diagnostic()
                .wrap_err_with(|| format!("lecture de {}", chemin.display()))?;
            Configuration::depuis_texte(&texte)?
        }
        None => {
            let couples = args
                .grandeurs
                .iter()
                .map(|g| lire_couple(g))
                .collect::<Result<Vec<_>, _>>()?;
            Configuration::new(args.fonction.unwrap_or_default(), &couples)
        }
    };

    let r = cfg.propager()?;

    if let Some(chemin) = &args.exporter {
        fs::write(chemin, cfg.vers_texte())
            .into_diagnostic()
            .wrap_err_with(|| format!("écriture de {}", chemin.display()))?;
        log::info!("configuration exportée vers {}", chemin.display());
    }

    Ok(vue::rendu_propagation(&cfg, &r))
}
