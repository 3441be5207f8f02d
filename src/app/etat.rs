//! src/app/etat.rs
//!
//! Paramètres de la ligne de commande (clap derive).
//!
//! Rôle : décrire ce que l’utilisateur fournit, sans aucun calcul.
//! Les valeurs par défaut des paramètres d’instrument peuvent venir de l’environnement
//! (`INCERTITUDE_FACTEUR_T`, `INCERTITUDE_DISTRIBUTION`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::noyau::formules::{Distribution, FACTEUR_T_DEFAUT};

#[derive(Parser, Debug)]
#[command(name = "incertitudes")]
#[command(version, about = "Calcul et présentation d’incertitudes de mesure")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub commande: Commande,

    /// Traces de calcul détaillées (jetons, RPN, dérivées)
    #[arg(long, short = 'v', global = true)]
    pub verbeux: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commande {
    /// Incertitude de type B depuis la limite d’un instrument
    B(ArgsB),

    /// Mesures répétées : moyenne, type A, type B et incertitude composée
    A(ArgsA),

    /// Mesure unique (lecture simple, ou deux lectures avec --regle)
    Unique(ArgsUnique),

    /// Propagation à travers une fonction y = f(x1, x2, ...)
    Propager(ArgsPropager),

    /// Présentation d’un couple valeur ± incertitude
    Formater(ArgsFormater),

    /// Arrondi décimal (moitié au pair, sauf chiffre non nul après le 5)
    Arrondir(ArgsArrondir),
}

/// Paramètres d’un instrument (limite + loi).
#[derive(Args, Debug, Clone)]
pub struct ArgsLimite {
    /// Limite d’erreur de l’instrument
    #[arg(long, default_value_t = 0.0)]
    pub limite: f64,

    /// Loi de distribution : uniforme, normale, triangulaire
    #[arg(
        long,
        short = 'd',
        env = "INCERTITUDE_DISTRIBUTION",
        default_value_t = Distribution::Uniforme
    )]
    pub distribution: Distribution,
}

#[derive(Args, Debug)]
pub struct ArgsB {
    #[command(flatten)]
    pub instrument: ArgsLimite,
}

#[derive(Args, Debug)]
pub struct ArgsA {
    /// Données mesurées ("1.2, 3.4" ou "1.2 3.4", plusieurs arguments acceptés)
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub donnees: Vec<String>,

    /// Facteur t (selon le nombre de mesures et le niveau de confiance)
    #[arg(long, short = 't', env = "INCERTITUDE_FACTEUR_T", default_value_t = FACTEUR_T_DEFAUT)]
    pub facteur_t: f64,

    #[command(flatten)]
    pub instrument: ArgsLimite,
}

#[derive(Args, Debug)]
pub struct ArgsUnique {
    /// Valeur lue
    #[arg(
        long,
        allow_negative_numbers = true,
        required_unless_present = "regle",
        conflicts_with = "regle"
    )]
    pub valeur: Option<f64>,

    /// Deux lectures (origine, extrémité) pour une mesure à la règle
    #[arg(long, num_args = 2, value_names = ["V1", "V2"], allow_negative_numbers = true)]
    pub regle: Option<Vec<f64>>,

    /// Plus petite graduation de l’instrument
    #[arg(long)]
    pub division: f64,

    /// Facteur d’estimation de lecture : 1/10, 1/5, 1/2, 1
    #[arg(long, default_value = "1/10")]
    pub lecture: String,

    #[command(flatten)]
    pub instrument: ArgsLimite,
}

#[derive(Args, Debug)]
pub struct ArgsPropager {
    /// Fonction, ex: "x1*x2", "sqrt(x1^2 + x2^2)"
    #[arg(required_unless_present = "fichier")]
    pub fonction: Option<String>,

    /// Grandeur d’entrée "valeur,incertitude" (répéter : x1, x2, ...)
    #[arg(long = "grandeur", short = 'g', allow_hyphen_values = true)]
    pub grandeurs: Vec<String>,

    /// Lit la fonction et les grandeurs dans un fichier de configuration
    #[arg(long, short = 'f', conflicts_with_all = ["fonction", "grandeurs"])]
    pub fichier: Option<PathBuf>,

    /// Écrit la configuration utilisée dans ce fichier
    #[arg(long, short = 'o')]
    pub exporter: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ArgsFormater {
    #[arg(allow_negative_numbers = true)]
    pub valeur: f64,

    #[arg(allow_negative_numbers = true)]
    pub incertitude: f64,
}

#[derive(Args, Debug)]
pub struct ArgsArrondir {
    #[arg(allow_negative_numbers = true)]
    pub x: f64,

    #[arg(allow_negative_numbers = true)]
    pub decimales: i32,
}
