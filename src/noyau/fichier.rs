// src/noyau/fichier.rs
//
// Format texte d’import/export d’une propagation :
//
//   x1*x2          <- 1re ligne : la fonction
//   10,0.1         <- puis une ligne "valeur,incertitude" par grandeur (x1, x2, ...)
//   2,0.05
//
// Le noyau ne lit ni n’écrit de fichier : il convertit texte <-> Configuration.

use super::erreur::{ErreurIncertitude, Resultat};
use super::formules::ResultatMesure;
use super::propagation::{nom_grandeur, propager_grandeurs, Grandeur};
use super::saisie::lire_reel;

#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub expression: String,
    /// Grandeurs dans l’ordre x1, x2, ...
    pub grandeurs: Vec<Grandeur>,
}

impl Configuration {
    /// Construit une configuration en nommant les couples (valeur, incertitude) x1, x2, ...
    pub fn new(expression: impl Into<String>, couples: &[(f64, f64)]) -> Self {
        let grandeurs = couples
            .iter()
            .enumerate()
            .map(|(i, &(v, u))| Grandeur::new(nom_grandeur(i), v, u))
            .collect();
        Self {
            expression: expression.into(),
            grandeurs,
        }
    }

    pub fn depuis_texte(texte: &str) -> Resultat<Self> {
        let mut lignes: Vec<&str> = texte.lines().collect();
        while lignes.last().is_some_and(|l| l.trim().is_empty()) {
            lignes.pop();
        }

        if lignes.len() < 2 {
            return Err(ErreurIncertitude::FichierMalforme(
                "il faut au moins la fonction et une grandeur".into(),
            ));
        }

        let expression = lignes[0].trim().to_string();

        let mut grandeurs = Vec::with_capacity(lignes.len() - 1);
        for (i, ligne) in lignes[1..].iter().enumerate() {
            let morceaux: Vec<&str> = ligne.trim().split(',').map(str::trim).collect();
            let [valeur, incertitude] = morceaux[..] else {
                return Err(ErreurIncertitude::FichierMalforme(format!(
                    "ligne {} \"{}\": attendu 'valeur,incertitude'",
                    i + 2,
                    ligne.trim()
                )));
            };
            grandeurs.push(Grandeur::new(
                nom_grandeur(i),
                lire_reel(valeur)?,
                lire_reel(incertitude)?,
            ));
        }

        log::debug!(
            "configuration importée: {expression} ({} grandeurs)",
            grandeurs.len()
        );

        Ok(Self {
            expression,
            grandeurs,
        })
    }

    pub fn vers_texte(&self) -> String {
        let mut s = format!("{}\n", self.expression.trim());
        for g in &self.grandeurs {
            s.push_str(&format!("{},{}\n", g.valeur, g.incertitude));
        }
        s
    }

    pub fn propager(&self) -> Resultat<ResultatMesure> {
        propager_grandeurs(&self.expression, &self.grandeurs)
    }
}
