// src/noyau/suffixe.rs
//
// Nombre final du tampon (utilisé par +/- et %).
//
// Règle : plus long suffixe de la forme `-?[0-9]+(\.[0-9]*)?` ou `-?\.[0-9]+`,
// ancré en fin de chaîne. Le '-' ne fait partie du nombre que s’il est un SIGNE :
// en tête du tampon ou juste après '('. Sinon c’est le moins binaire ("5-3" => "3").
//
// Cas supplémentaire : un groupe "(-N)" (produit par +/-) en fin de tampon
// compte lui-même comme nombre final, sous la forme `Enveloppe`.

/// Forme du nombre final trouvé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Forme {
    /// Nombre nu, signé ou non ("12", "-3.5", ".5").
    Nu,
    /// Groupe "(-N)" : `debut` pointe sur '(' ; le texte retenu est "N".
    Enveloppe,
}

/// Nombre final : position de départ (octets) dans le tampon + texte + forme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NombreFinal<'a> {
    pub debut: usize,
    pub texte: &'a str,
    pub forme: Forme,
}

impl NombreFinal<'_> {
    pub fn est_negatif(&self) -> bool {
        self.forme == Forme::Enveloppe || self.texte.starts_with('-')
    }
}

/// Cherche le nombre final de `s`. `None` si le tampon ne finit pas par un nombre.
pub fn nombre_final(s: &str) -> Option<NombreFinal<'_>> {
    if let Some(interieur) = s.strip_suffix(')') {
        let debut = interieur.rfind("(-")?;
        let nombre = &interieur[debut + 2..];
        if est_nombre_nu(nombre) {
            return Some(NombreFinal {
                debut,
                texte: nombre,
                forme: Forme::Enveloppe,
            });
        }
        return None;
    }

    let debut = debut_nombre_nu(s)?;
    Some(NombreFinal {
        debut,
        texte: &s[debut..],
        forme: Forme::Nu,
    })
}

/// Début du suffixe numérique (sans parenthèse), signe compris s’il en est un.
fn debut_nombre_nu(s: &str) -> Option<usize> {
    let octets = s.as_bytes();
    let mut i = octets.len();
    while i > 0 && (octets[i - 1].is_ascii_digit() || octets[i - 1] == b'.') {
        i -= 1;
    }

    // Un seul '.' au plus, et au moins un chiffre.
    let corps = &s[i..];
    if corps.matches('.').count() > 1 || !corps.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    if i > 0 && octets[i - 1] == b'-' && (i == 1 || octets[i - 2] == b'(') {
        i -= 1;
    }
    Some(i)
}

fn est_nombre_nu(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && s.matches('.').count() <= 1
        && s.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && s.bytes().any(|b| b.is_ascii_digit())
}
