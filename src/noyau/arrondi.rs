// src/noyau/arrondi.rs
//
// Arrondi décimal exact.
//
// On travaille sur l’écriture décimale du flottant (la plus courte qui le relit
// exactement), jamais sur sa valeur binaire : 0.125 et 0.135 sont traités comme
// les textes "0.125" et "0.135".
//
// Règle (chiffre d = premier chiffre abandonné, reste = chiffres suivants) :
// - d < 5            : on tronque
// - d > 5            : on monte (en s’éloignant de zéro)
// - d = 5, reste ≠ 0 : on monte
// - d = 5, reste = 0 : au pair (dernier chiffre conservé pair)

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use super::erreur::{ErreurIncertitude, Resultat};

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Nombre décimal exact : mantisse × 10^(-echelle).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalExact {
    mantisse: BigInt,
    echelle: usize,
}

impl DecimalExact {
    /// Lit l’écriture décimale la plus courte de `x`. `None` si x n’est pas fini.
    pub fn depuis_f64(x: f64) -> Option<DecimalExact> {
        if !x.is_finite() {
            return None;
        }
        // Display de f64 : jamais de notation scientifique, aller-retour exact
        DecimalExact::depuis_texte(&format!("{x}"))
    }

    /// Lit un texte "-123.4500" (sans exposant).
    pub fn depuis_texte(texte: &str) -> Option<DecimalExact> {
        let t = texte.trim();
        let (neg, corps) = match t.strip_prefix('-') {
            Some(reste) => (true, reste),
            None => (false, t.strip_prefix('+').unwrap_or(t)),
        };

        let (entier, fraction) = corps.split_once('.').unwrap_or((corps, ""));
        if entier.is_empty() && fraction.is_empty() {
            return None;
        }
        if !entier.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let chiffres = format!("{entier}{fraction}");
        let mut mantisse = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
        if neg {
            mantisse = -mantisse;
        }

        Some(DecimalExact {
            mantisse,
            echelle: fraction.len(),
        })
    }

    /// Nombre de chiffres après la virgule dans l’écriture lue.
    pub fn echelle(&self) -> usize {
        self.echelle
    }

    /// Arrondit à `decimales` chiffres après la virgule (règle en tête de module).
    pub fn arrondir(&self, decimales: usize) -> DecimalExact {
        // déjà exact à cette précision : rien à départager
        if self.echelle <= decimales {
            return self.clone();
        }

        let abandon = self.echelle - decimales;
        let diviseur = pow10(abandon);
        let abs = self.mantisse.abs();
        let (q, r) = (&abs / &diviseur, &abs % &diviseur);

        let unite_d = pow10(abandon - 1);
        let (d, reste) = (&r / &unite_d, &r % &unite_d);

        let cinq = BigInt::from(5);
        let monter = if d < cinq {
            false
        } else if d > cinq {
            true
        } else if !reste.is_zero() {
            true
        } else {
            !(&q % 2u32).is_zero()
        };

        let q = if monter { q + BigInt::one() } else { q };
        let mantisse = if self.mantisse.is_negative() { -q } else { q };

        DecimalExact {
            mantisse,
            echelle: decimales,
        }
    }

    /// Écriture à virgule fixe avec exactement `decimales` chiffres (zéros complétés).
    ///
    /// Suppose `decimales >= echelle` (appeler `arrondir` avant).
    pub fn en_texte_fixe(&self, decimales: usize) -> String {
        let mut m = self.mantisse.abs();
        if decimales > self.echelle {
            m *= pow10(decimales - self.echelle);
        }
        let echelle = decimales.max(self.echelle);

        let scale = pow10(echelle);
        let (int_part, frac_part) = (&m / &scale, &m % &scale);

        // -0.00 s’écrit 0.00
        let signe = if self.mantisse.is_negative() && !m.is_zero() {
            "-"
        } else {
            ""
        };

        if echelle == 0 {
            return format!("{signe}{int_part}");
        }

        let mut frac = frac_part.to_str_radix(10);
        while frac.len() < echelle {
            frac.insert(0, '0');
        }
        format!("{signe}{int_part}.{frac}")
    }

    pub fn en_f64(&self) -> f64 {
        // le texte fixe se relit sans perte supplémentaire
        self.en_texte_fixe(self.echelle).parse().unwrap_or(f64::NAN)
    }
}

/// Arrondit `x` à `decimales` chiffres après la virgule, sur son écriture décimale.
///
/// `decimales < 0` => `ArgumentInvalide`. Un x non fini est rendu tel quel.
pub fn arrondir_decimal(x: f64, decimales: i32) -> Resultat<f64> {
    if decimales < 0 {
        return Err(ErreurIncertitude::ArgumentInvalide(format!(
            "nombre de décimales négatif: {decimales}"
        )));
    }
    match DecimalExact::depuis_f64(x) {
        Some(d) => Ok(d.arrondir(decimales as usize).en_f64()),
        None => Ok(x),
    }
}
