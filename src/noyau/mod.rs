//! Noyau de calcul des incertitudes
//!
//! Organisation interne :
//! - erreur.rs      : taxonomie des erreurs (thiserror + miette)
//! - jetons.rs      : tokenisation (littéraux décimaux exacts)
//! - rpn.rs         : shunting-yard + construction Expr
//! - expr.rs        : AST exact + simplify
//! - eval.rs        : analyse complète + évaluation f64
//! - derivee.rs     : dérivées partielles symboliques
//! - formules.rs    : types A/B, composition, démarches de mesure
//! - propagation.rs : loi de propagation du premier ordre
//! - arrondi.rs     : arrondi décimal exact
//! - format.rs      : 2 chiffres significatifs + valeur alignée
//! - saisie.rs      : lecture de listes de nombres
//! - fichier.rs     : format texte d’import/export

pub mod arrondi;
pub mod derivee;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fichier;
pub mod format;
pub mod formules;
pub mod jetons;
pub mod propagation;
pub mod rpn;
pub mod saisie;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;
