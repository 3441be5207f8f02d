// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),
    Pi,
    E,

    // Fonctions + variables (tout ce qui n’est pas constante / opérateur / nombre)
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction (sin/log/...) ou une variable.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    Virgule, // séparateur d’arguments : log(x, 10)

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux exacts (ex: 12, 0.125, .5, 1.5e-3) -> Num(rationnel)
/// - opérateurs + - * / ^ et ** (puissance)
/// - parenthèses ( ) et virgule
/// - π ou pi, E (base des logarithmes naturels)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (sensibles à la casse : x1 ≠ X1)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Virgule);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // ** = puissance (syntaxe Python)
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Caret);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            'π' => {
                out.push(Tok::Pi);
                i += 1;
                continue;
            }
            // Racine carrée unicode : √  => ident("sqrt")
            '√' => {
                out.push(Tok::Ident("sqrt".to_string()));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            match word.as_str() {
                "pi" | "PI" | "Pi" => out.push(Tok::Pi),
                "E" => out.push(Tok::E),
                _ => out.push(Tok::Ident(word)),
            }
            continue;
        }

        // Nombre décimal : partie entière, fraction, exposant
        if c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit())
        {
            let (rat, suivant) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(rat));
            i = suivant;
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Lit un littéral décimal à partir de `debut` et renvoie (valeur exacte, index suivant).
///
/// 1.5e-3 => 15 / 10^1 * 10^-3 = 3/2000, sans passer par un flottant.
fn lire_nombre(chars: &[char], debut: usize) -> Result<(BigRational, usize), String> {
    let mut i = debut;
    let mut chiffres = String::new();
    let mut decimales: i64 = 0;

    while i < chars.len() && chars[i].is_ascii_digit() {
        chiffres.push(chars[i]);
        i += 1;
    }

    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            chiffres.push(chars[i]);
            decimales += 1;
            i += 1;
        }
    }

    if chiffres.is_empty() {
        return Err("nombre invalide".into());
    }

    // exposant seulement si suivi d’un chiffre (sinon "2E" reste 2 * E)
    let mut exposant: i64 = 0;
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        let mut negatif = false;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            negatif = chars[j] == '-';
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            let start = j;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let e_str: String = chars[start..j].iter().collect();
            let e: i64 = e_str.parse().map_err(|_| "exposant trop grand".to_string())?;
            exposant = if negatif { -e } else { e };
            i = j;
        }
    }

    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or("nombre invalide")?;
    let puissance = exposant
        .checked_sub(decimales)
        .ok_or("exposant trop grand")?;
    if puissance.unsigned_abs() > 4096 {
        return Err("exposant trop grand".into());
    }

    let dix = BigInt::from(10u32).pow(puissance.unsigned_abs() as u32);
    let rat = if puissance >= 0 {
        BigRational::from_integer(n * dix)
    } else {
        BigRational::new(n, dix)
    };

    Ok((rat, i))
}

/// Format utilitaire (journal de debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else if n.is_zero() {
            "0".to_string()
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Pi => "π".to_string(),
            Tok::E => "E".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Virgule => ",".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
