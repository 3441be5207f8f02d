// src/noyau/format.rs
//
// Présentation d’un couple (valeur, incertitude) :
// - l’incertitude à 2 chiffres significatifs
// - la valeur arrondie au même nombre de décimales que ce texte

use std::fmt;

use super::arrondi::DecimalExact;

/// Décimales utilisées quand l’incertitude ne fixe pas la précision.
pub const DECIMALES_DEFAUT: usize = 4;

/// Couple de textes prêts à afficher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultatFormate {
    pub valeur: String,
    pub incertitude: String,
}

impl fmt::Display for ResultatFormate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ± {}", self.valeur, self.incertitude)
    }
}

/* ------------------------ 2 chiffres significatifs ------------------------ */

/// Écriture à 2 chiffres significatifs, zéros finaux conservés.
///
/// Virgule fixe pour un exposant décimal dans [-4, 2), sinon `d.de±XX`.
pub fn deux_chiffres_significatifs(x: f64) -> String {
    if !x.is_finite() {
        return format!("{x}");
    }
    if x == 0.0 {
        return "0.0".to_string();
    }

    // l’exposant se lit après arrondi à 2 chiffres (9.96 -> 1.0e1)
    let sci = format!("{x:.1e}");
    let Some((mantisse, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    if (-4..2).contains(&exp) {
        let decimales = (1 - exp) as usize;
        format!("{x:.decimales$}")
    } else {
        let signe = if exp < 0 { '-' } else { '+' };
        format!("{mantisse}e{signe}{:02}", exp.abs())
    }
}

/// Nombre de décimales porté par un texte numérique ("0.0012" -> 4, "1.2e-05" -> 6,
/// "1.2e+03" -> 0). `None` si le texte n’est pas lisible.
pub fn decimales_implicites(texte: &str) -> Option<usize> {
    let t = texte.trim();
    let (mantisse, exp) = match t.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().ok()?),
        None => (t, 0),
    };

    let mantisse = mantisse.strip_prefix(['-', '+']).unwrap_or(mantisse);
    let (entier, fraction) = mantisse.split_once('.').unwrap_or((mantisse, ""));
    if entier.is_empty() && fraction.is_empty() {
        return None;
    }
    if !entier.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let d = fraction.len() as i64 - exp;
    Some(d.max(0) as usize)
}

/* ------------------------ Formatage du résultat ------------------------ */

fn valeur_fixe(valeur: f64, decimales: usize) -> String {
    match DecimalExact::depuis_f64(valeur) {
        Some(d) => d.arrondir(decimales).en_texte_fixe(decimales),
        None => format!("{valeur}"),
    }
}

/// Textes d’affichage de (valeur, incertitude).
///
/// Le signe d’une incertitude négative est ignoré. Une incertitude nulle laisse la
/// valeur à `DECIMALES_DEFAUT` décimales.
pub fn formater_resultat(valeur: f64, incertitude: f64) -> ResultatFormate {
    let u = incertitude.abs();

    if u == 0.0 {
        return ResultatFormate {
            valeur: valeur_fixe(valeur, DECIMALES_DEFAUT),
            incertitude: deux_chiffres_significatifs(u),
        };
    }

    let u_txt = deux_chiffres_significatifs(u);
    let decimales = decimales_implicites(&u_txt).unwrap_or_else(|| {
        log::warn!(
            "précision illisible dans \"{u_txt}\", repli sur {DECIMALES_DEFAUT} décimales"
        );
        DECIMALES_DEFAUT
    });

    ResultatFormate {
        valeur: valeur_fixe(valeur, decimales),
        incertitude: u_txt,
    }
}
