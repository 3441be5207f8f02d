// src/app/vue.rs
//
// Vue texte : met en forme les résultats du noyau pour le terminal.
// Aucun calcul ici, seulement des chaînes (toute valeur passe par formater_resultat).

use crate::noyau::fichier::Configuration;
use crate::noyau::format::{deux_chiffres_significatifs, formater_resultat};
use crate::noyau::formules::{Distribution, MesureRepetee, ResultatMesure};

/// "titre = valeur ± incertitude"
pub fn ligne_resultat(titre: &str, r: &ResultatMesure) -> String {
    format!("{titre} = {}", formater_resultat(r.valeur, r.incertitude))
}

/// Une composante d’incertitude seule, à 2 chiffres significatifs.
pub fn ligne_composante(titre: &str, u: f64) -> String {
    format!("{titre} = {}", deux_chiffres_significatifs(u))
}

pub fn rendu_type_b(u_b: f64, distribution: Distribution) -> String {
    format!("{} ({distribution})", ligne_composante("u_B", u_b))
}

pub fn rendu_mesures_repetees(n: usize, m: &MesureRepetee) -> String {
    [
        format!("n = {n}"),
        ligne_composante("s", m.stats.ecart_type),
        ligne_composante("u_A", m.stats.u_a),
        ligne_composante("u_B", m.u_b),
        ligne_resultat("x", &m.resultat),
    ]
    .join("\n")
}

pub fn rendu_propagation(cfg: &Configuration, r: &ResultatMesure) -> String {
    let mut lignes = vec![format!("y = {}", cfg.expression.trim())];
    for g in &cfg.grandeurs {
        let f = formater_resultat(g.valeur, g.incertitude);
        lignes.push(format!("  {} = {f}", g.nom));
    }
    lignes.push(ligne_resultat("y", r));
    lignes.join("\n")
}
