// src/noyau/format.rs
//
// Rendu des nombres :
// - arrondi à N chiffres significatifs (gomme le bruit binaire : 0.1+0.2 => 0.3)
// - rendu décimal le plus court qui relit la même valeur (jamais d’exposant)
// - pourcentage EXACT : N/100 calculé en rationnel, pas en flottant

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/// Bornes utiles pour f64 (au-delà de 17, l’arrondi n’a plus d’effet).
pub const CHIFFRES_MIN: usize = 1;
pub const CHIFFRES_MAX: usize = 17;

/// Arrondi à `chiffres` chiffres significatifs.
pub fn arrondir_significatif(v: f64, chiffres: usize) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    let c = chiffres.clamp(CHIFFRES_MIN, CHIFFRES_MAX);
    // Passage par la notation scientifique : arrondi décimal correct (pas de 10^k flottant).
    format!("{:.*e}", c - 1, v).parse::<f64>().unwrap_or(v)
}

/// Rendu d’affichage : décimal simple, "-0" normalisé en "0".
pub fn rendre(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/* ------------------------ Pourcentage exact ------------------------ */

/// "50" => "0.5", "-12.5" => "-0.125", ".5" => "0.005".
/// `None` si `nombre` n’est pas un décimal simple.
pub fn pourcent(nombre: &str) -> Option<String> {
    let r = lire_decimal(nombre)?;
    let centieme = r / BigRational::from_integer(BigInt::from(100));
    decimal_exact(&centieme)
}

/// Lit un décimal simple en rationnel exact (signe, partie entière, partie fractionnaire).
fn lire_decimal(s: &str) -> Option<BigRational> {
    let (negatif, corps) = match s.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, s),
    };
    let (entier, frac) = corps.split_once('.').unwrap_or((corps, ""));
    if entier.is_empty() && frac.is_empty() {
        return None;
    }

    let chiffres = format!("{entier}{frac}");
    let mantisse = if chiffres.is_empty() {
        BigInt::zero()
    } else {
        BigInt::parse_bytes(chiffres.as_bytes(), 10)?
    };
    let echelle = BigInt::from(10).pow(u32::try_from(frac.len()).ok()?);

    let r = BigRational::new(mantisse, echelle);
    Some(if negatif { -r } else { r })
}

/// Rendu décimal exact d’un rationnel à dénominateur 2^a·5^b.
/// `None` si le développement ne se termine pas.
fn decimal_exact(r: &BigRational) -> Option<String> {
    if r.is_zero() {
        return Some("0".to_string());
    }

    let dix = BigInt::from(10);
    let mut x = r.abs();
    let mut decimales: usize = 0;
    while !x.is_integer() {
        x *= BigRational::from_integer(dix.clone());
        decimales += 1;
        // garde-fou : 2^a·5^b se termine en max(a, b) étapes
        if decimales > 4096 {
            return None;
        }
    }

    let mut chiffres = x.to_integer().to_string();
    if decimales > 0 {
        if chiffres.len() <= decimales {
            chiffres = format!("{}{chiffres}", "0".repeat(decimales + 1 - chiffres.len()));
        }
        chiffres.insert(chiffres.len() - decimales, '.');
    }

    let signe = if r.is_negative() { "-" } else { "" };
    Some(format!("{signe}{chiffres}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bruit_binaire_supprime() {
        assert_eq!(rendre(arrondir_significatif(0.1 + 0.2, 15)), "0.3");
        assert_eq!(rendre(arrondir_significatif(1.1 * 3.0, 15)), "3.3");
        assert!(arrondir_significatif(f64::MAX, 15).is_infinite());
    }

    #[test]
    fn rendu_sans_exposant() {
        assert_eq!(rendre(1e20), "100000000000000000000");
        assert_eq!(rendre(0.0000001), "0.0000001");
        assert_eq!(rendre(-0.0), "0");
        assert_eq!(rendre(-2.5), "-2.5");
    }

    #[test]
    fn arrondi_borne() {
        assert_eq!(arrondir_significatif(123456.0, 2), 120000.0);
        assert_eq!(arrondir_significatif(2.0 / 3.0, 0), 0.7);
    }

    #[test]
    fn pourcent_exact() {
        assert_eq!(pourcent("50").as_deref(), Some("0.5"));
        assert_eq!(pourcent("-12.5").as_deref(), Some("-0.125"));
        assert_eq!(pourcent(".5").as_deref(), Some("0.005"));
        assert_eq!(pourcent("0.07").as_deref(), Some("0.0007"));
        assert_eq!(pourcent("300").as_deref(), Some("3"));
        assert_eq!(pourcent("4.").as_deref(), Some("0.04"));
        assert_eq!(pourcent("0").as_deref(), Some("0"));
        assert_eq!(pourcent("."), None);
    }

    #[test]
    fn decimal_exact_refuse_periodique() {
        let tiers = BigRational::new(BigInt::from(1), BigInt::from(3));
        assert_eq!(decimal_exact(&tiers), None);
    }
}
