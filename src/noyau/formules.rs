// src/noyau/formules.rs
//
// Formules d’incertitude (fonctions pures) :
// - type B depuis la limite d’un instrument et une loi de distribution
// - type A depuis des mesures répétées (écart-type expérimental, facteur t)
// - composition quadratique (somme des carrés)
// + les trois démarches de mesure d’une grandeur unique (générale, règle, répétée)

use std::fmt;
use std::str::FromStr;

use num_rational::BigRational;
use num_traits::ToPrimitive;

use super::erreur::{ErreurIncertitude, Resultat};
use super::saisie::lire_reel;

/// Facteur t par défaut (l’utilisateur le fournit selon le nombre de mesures).
pub const FACTEUR_T_DEFAUT: f64 = 1.0;

/// Loi de distribution supposée pour l’erreur d’un instrument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Distribution {
    #[default]
    Uniforme,
    Normale,
    Triangulaire,
}

impl Distribution {
    /// Diviseur k : u_B = limite / k.
    pub fn diviseur(self) -> f64 {
        match self {
            Distribution::Uniforme => 3f64.sqrt(),
            Distribution::Normale => 2.0,
            Distribution::Triangulaire => 6f64.sqrt(),
        }
    }
}

impl FromStr for Distribution {
    type Err = ErreurIncertitude;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uniforme" | "uniform" | "均匀分布" => Ok(Distribution::Uniforme),
            "normale" | "normal" | "正态分布" => Ok(Distribution::Normale),
            "triangulaire" | "triangular" | "三角形分布" => Ok(Distribution::Triangulaire),
            _ => Err(ErreurIncertitude::DistributionInvalide(s.to_string())),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Distribution::Uniforme => "uniforme",
            Distribution::Normale => "normale",
            Distribution::Triangulaire => "triangulaire",
        };
        f.write_str(s)
    }
}

/// Couple (valeur, incertitude) produit par un calcul. Jamais conservé.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResultatMesure {
    pub valeur: f64,
    pub incertitude: f64,
}

/// Détail d’une série de mesures répétées avec instrument.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MesureRepetee {
    pub stats: StatistiquesA,
    pub u_b: f64,
    pub resultat: ResultatMesure,
}

/// Sortie du calcul de type A.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StatistiquesA {
    pub moyenne: f64,
    pub u_a: f64,
    pub ecart_type: f64,
}

/// u_B = limite / k(distribution).
pub fn incertitude_b_depuis_limite(limite: f64, distribution: Distribution) -> f64 {
    limite / distribution.diviseur()
}

/// Variante texte : la distribution est nommée (échoue avec `DistributionInvalide`).
pub fn incertitude_b_depuis_texte(limite: f64, distribution: &str) -> Resultat<f64> {
    Ok(incertitude_b_depuis_limite(limite, distribution.parse()?))
}

/// u = √(u_A² + u_B²), sans passer par les carrés (pas de dépassement ni de sous-dépassement).
pub fn incertitude_combinee(u_a: f64, u_b: f64) -> f64 {
    u_a.hypot(u_b)
}

/// Moyenne, u_A = t·s/√n et écart-type expérimental s (correction de Bessel).
///
/// Avec un seul échantillon, s est indéfini : u_A et s valent 0 par convention.
pub fn incertitude_a_mesures_multiples(
    echantillons: &[f64],
    facteur_t: f64,
) -> Resultat<StatistiquesA> {
    if echantillons.is_empty() {
        return Err(ErreurIncertitude::EntreeVide);
    }

    let n = echantillons.len() as f64;
    let moyenne = echantillons.iter().sum::<f64>() / n;

    if echantillons.len() < 2 {
        return Ok(StatistiquesA {
            moyenne,
            u_a: 0.0,
            ecart_type: 0.0,
        });
    }

    let somme_carres: f64 = echantillons.iter().map(|x| (x - moyenne).powi(2)).sum();
    let ecart_type = (somme_carres / (n - 1.0)).sqrt();
    let u_a = facteur_t * ecart_type / n.sqrt();

    Ok(StatistiquesA {
        moyenne,
        u_a,
        ecart_type,
    })
}

/* ------------------------ Démarches de mesure ------------------------ */

/// Facteur d’estimation de lecture (Δx/Δ) : "1/10", "1/5", "1/2", "1" ou un réel.
pub fn lire_facteur_lecture(texte: &str) -> Resultat<f64> {
    let t = texte.trim();
    if t.contains('/') {
        let r: BigRational = t
            .parse()
            .map_err(|_| ErreurIncertitude::NombreInvalide(t.to_string()))?;
        return r
            .to_f64()
            .ok_or_else(|| ErreurIncertitude::NombreInvalide(t.to_string()));
    }
    lire_reel(t)
}

/// Paramètres communs à une lecture d’instrument.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Instrument {
    /// Plus petite graduation Δ.
    pub division: f64,
    /// Part de graduation estimée à la lecture (ex: 0.1 pour 1/10).
    pub facteur_lecture: f64,
    /// Limite d’erreur de l’instrument.
    pub limite: f64,
    pub distribution: Distribution,
}

impl Instrument {
    fn u_b_instrument(&self) -> f64 {
        incertitude_b_depuis_limite(self.limite, self.distribution)
    }

    fn u_lecture(&self) -> f64 {
        self.facteur_lecture * self.division
    }
}

/// Mesure unique “générale” : une lecture.
pub fn mesure_unique(valeur: f64, instrument: &Instrument) -> ResultatMesure {
    ResultatMesure {
        valeur,
        incertitude: incertitude_combinee(instrument.u_b_instrument(), instrument.u_lecture()),
    }
}

/// Mesure unique “type règle” : deux lectures (origine et extrémité).
///
/// Chaque lecture apporte sa propre erreur d’estimation : √2 · (k·Δ).
pub fn mesure_unique_regle(lecture1: f64, lecture2: f64, instrument: &Instrument) -> ResultatMesure {
    let u_lecture = (2.0 * instrument.u_lecture().powi(2)).sqrt();
    ResultatMesure {
        valeur: (lecture2 - lecture1).abs(),
        incertitude: incertitude_combinee(instrument.u_b_instrument(), u_lecture),
    }
}

/// Mesures répétées : moyenne ± √(u_A² + u_B²), avec les composantes A et B.
pub fn mesure_multiple(
    echantillons: &[f64],
    facteur_t: f64,
    limite: f64,
    distribution: Distribution,
) -> Resultat<MesureRepetee> {
    let stats = incertitude_a_mesures_multiples(echantillons, facteur_t)?;
    let u_b = incertitude_b_depuis_limite(limite, distribution);
    let resultat = ResultatMesure {
        valeur: stats.moyenne,
        incertitude: incertitude_combinee(stats.u_a, u_b),
    };
    Ok(MesureRepetee {
        stats,
        u_b,
        resultat,
    })
}
