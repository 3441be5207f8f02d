// src/noyau/propagation.rs
//
// Propagation des incertitudes (loi du premier ordre, grandeurs indépendantes) :
//
//   u(y)² = Σ (∂f/∂xᵢ · u(xᵢ))²
//
// Les coefficients de sensibilité viennent de la dérivée symbolique exacte,
// évaluée au point de mesure.

use std::collections::BTreeMap;

use super::derivee::derivee_partielle;
use super::erreur::{ErreurIncertitude, Resultat};
use super::eval::{analyser, evaluer};
use super::formules::ResultatMesure;

/// Grandeur d’entrée nommée : valeur ± incertitude.
#[derive(Clone, Debug, PartialEq)]
pub struct Grandeur {
    pub nom: String,
    pub valeur: f64,
    pub incertitude: f64,
}

impl Grandeur {
    pub fn new(nom: impl Into<String>, valeur: f64, incertitude: f64) -> Self {
        Self {
            nom: nom.into(),
            valeur,
            incertitude,
        }
    }
}

/// Nom conventionnel de la i-ème grandeur (à partir de 0) : x1, x2, ...
pub fn nom_grandeur(i: usize) -> String {
    format!("x{}", i + 1)
}

/// Valeur de `expr_str` et son incertitude propagée.
///
/// Un nom de `valeurs` absent de l’expression ne contribue pas (son incertitude n’est
/// pas exigée). Un nom présent sans incertitude donne `IncertitudeManquante`.
pub fn propager(
    expr_str: &str,
    valeurs: &BTreeMap<String, f64>,
    incertitudes: &BTreeMap<String, f64>,
) -> Resultat<ResultatMesure> {
    if expr_str.trim().is_empty() {
        return Err(ErreurIncertitude::ExpressionVide);
    }
    if valeurs.is_empty() {
        return Err(ErreurIncertitude::ValeursVides);
    }
    if incertitudes.is_empty() {
        return Err(ErreurIncertitude::IncertitudesVides);
    }

    let expr = analyser(expr_str)?;
    log::debug!("variables: {:?}", expr.variables());
    let y = evaluer(&expr, valeurs)?;

    // somme quadratique cumulée par hypot : (c·u)² ne sort jamais de f64
    let mut u_y = 0.0f64;
    for nom in valeurs.keys() {
        if !expr.contient_var(nom) {
            continue;
        }

        let d = derivee_partielle(&expr, nom);
        log::debug!("∂f/∂{nom} = {d}");

        let c = evaluer(&d, valeurs)?;
        let u = *incertitudes
            .get(nom)
            .ok_or_else(|| ErreurIncertitude::IncertitudeManquante(nom.clone()))?;

        u_y = u_y.hypot(c * u);
    }

    Ok(ResultatMesure {
        valeur: y,
        incertitude: u_y,
    })
}

/// Variante sur une liste de grandeurs nommées.
pub fn propager_grandeurs(expr_str: &str, grandeurs: &[Grandeur]) -> Resultat<ResultatMesure> {
    let valeurs = grandeurs.iter().map(|g| (g.nom.clone(), g.valeur)).collect();
    let incertitudes = grandeurs
        .iter()
        .map(|g| (g.nom.clone(), g.incertitude))
        .collect();
    propager(expr_str, &valeurs, &incertitudes)
}
