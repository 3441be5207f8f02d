// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Toutes sont des erreurs de validation récupérables : l'appelant décide
// de la présentation (le noyau n'affiche rien).

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ErreurIncertitude {
    #[error("type de distribution invalide: '{0}' (uniforme, normale ou triangulaire)")]
    #[diagnostic(code(incertitudes::distribution))]
    DistributionInvalide(String),

    #[error("la liste de données ne peut pas être vide")]
    #[diagnostic(code(incertitudes::entree_vide))]
    EntreeVide,

    #[error("l'expression de la fonction ne peut pas être vide")]
    #[diagnostic(code(incertitudes::expression_vide))]
    ExpressionVide,

    #[error("les valeurs mesurées des grandeurs d'entrée ne peuvent pas être vides")]
    #[diagnostic(code(incertitudes::valeurs_vides))]
    ValeursVides,

    #[error("les incertitudes des grandeurs d'entrée ne peuvent pas être vides")]
    #[diagnostic(code(incertitudes::incertitudes_vides))]
    IncertitudesVides,

    #[error("expression invalide: {0}")]
    #[diagnostic(
        code(incertitudes::expression),
        help("opérateurs + - * / ^ **, fonctions sqrt abs log ln log10 exp sin cos tan asin acos atan sinh cosh tanh")
    )]
    ExpressionInvalide(String),

    #[error("incertitude manquante pour la variable '{0}'")]
    #[diagnostic(code(incertitudes::incertitude_manquante))]
    IncertitudeManquante(String),

    #[error("aucune valeur pour la variable '{0}'")]
    #[diagnostic(code(incertitudes::variable_sans_valeur))]
    VariableSansValeur(String),

    #[error("évaluation impossible: {0}")]
    #[diagnostic(code(incertitudes::evaluation))]
    EvaluationImpossible(String),

    #[error("argument invalide: {0}")]
    #[diagnostic(code(incertitudes::argument))]
    ArgumentInvalide(String),

    #[error("la liste contient un élément non numérique: '{0}'")]
    #[diagnostic(code(incertitudes::nombre))]
    NombreInvalide(String),

    #[error("fichier mal formé: {0}")]
    #[diagnostic(
        code(incertitudes::fichier),
        help("1re ligne: la fonction; puis une ligne 'valeur,incertitude' par grandeur")
    )]
    FichierMalforme(String),
}

pub type Resultat<T> = Result<T, ErreurIncertitude>;
