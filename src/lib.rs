// src/lib.rs
//
// Calculatrice d’incertitudes de mesure.
// - noyau : formules, propagation symbolique, arrondi et présentation
// - app   : appelant ligne de commande (arguments + rendu texte)

pub mod app;
pub mod noyau;

// API publique : seul point de réexport du noyau
pub use noyau::arrondi::arrondir_decimal;
pub use noyau::erreur::{ErreurIncertitude, Resultat};
pub use noyau::format::{formater_resultat, ResultatFormate};
pub use noyau::formules::{
    incertitude_a_mesures_multiples, incertitude_b_depuis_limite, incertitude_combinee,
    Distribution, MesureRepetee, ResultatMesure,
};
pub use noyau::propagation::{propager, Grandeur};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_depuis_la_racine() {
        assert_eq!(arrondir_decimal(2.675, 2), Ok(2.68));
        assert_eq!(incertitude_combinee(3.0, 4.0), 5.0);
        let u_b = incertitude_b_depuis_limite(0.02, Distribution::Normale);
        assert!((u_b - 0.01).abs() < 1e-15);
        let s = incertitude_a_mesures_multiples(&[1.0, 3.0], 1.0).unwrap();
        assert_eq!(s.moyenne, 2.0);
    }
}
