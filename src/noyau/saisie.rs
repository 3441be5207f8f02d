// src/noyau/saisie.rs
//
// Lecture de nombres saisis librement : "1.2, 3.4, 5.6", "1.2 3.4 5.6",
// virgule pleine chasse (，) et espace idéographique (　) acceptés.

use super::erreur::{ErreurIncertitude, Resultat};

/// Un réel, ou `NombreInvalide(texte)`.
pub fn lire_reel(texte: &str) -> Resultat<f64> {
    let t = texte.trim();
    t.parse::<f64>()
        .map_err(|_| ErreurIncertitude::NombreInvalide(t.to_string()))
}

/// Liste de réels séparés par des virgules (ASCII ou pleine chasse) ou des blancs.
///
/// Une chaîne vide donne une liste vide ; le premier élément non numérique est nommé
/// dans l’erreur.
pub fn lire_liste_reels(texte: &str) -> Resultat<Vec<f64>> {
    texte
        .split(|c: char| c == ',' || c == '，' || c.is_whitespace())
        .filter(|e| !e.is_empty())
        .map(lire_reel)
        .collect()
}
