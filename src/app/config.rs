//! src/app/config.rs
//!
//! Configuration typée (serde + toml).
//! Le fichier par défaut est embarqué : aucune lecture disque, natif comme web.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::noyau::format::{CHIFFRES_MAX, CHIFFRES_MIN};
use crate::noyau::moteur::CHIFFRES_DEFAUT;

const CONFIG_EMBARQUEE: &str = include_str!("../../config/calculatrice.toml");

#[derive(Debug, Error)]
pub enum ErreurConfig {
    #[error("toml invalide: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(
        "chiffres_significatifs hors bornes ({0}, attendu {min}..={max})",
        min = CHIFFRES_MIN,
        max = CHIFFRES_MAX
    )]
    Chiffres(usize),

    #[error("fenêtre invalide ({largeur}×{hauteur})")]
    Fenetre { largeur: f32, hauteur: f32 },
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Fenetre {
    pub largeur: f32,
    pub hauteur: f32,
}

impl Default for Fenetre {
    fn default() -> Self {
        Self {
            largeur: 340.0,
            hauteur: 560.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub titre: String,
    pub chiffres_significatifs: usize,
    pub historique_max: usize,
    pub fenetre: Fenetre,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            titre: "Calculatrice".to_string(),
            chiffres_significatifs: CHIFFRES_DEFAUT,
            historique_max: 10,
            fenetre: Fenetre::default(),
        }
    }
}

impl Config {
    /// Lit et valide une configuration TOML.
    pub fn depuis_toml(s: &str) -> Result<Self, ErreurConfig> {
        let c: Config = toml::from_str(s)?;
        c.valider()?;
        Ok(c)
    }

    fn valider(&self) -> Result<(), ErreurConfig> {
        if !(CHIFFRES_MIN..=CHIFFRES_MAX).contains(&self.chiffres_significatifs) {
            return Err(ErreurConfig::Chiffres(self.chiffres_significatifs));
        }
        let Fenetre { largeur, hauteur } = self.fenetre;
        if !(largeur > 0.0 && hauteur > 0.0) {
            return Err(ErreurConfig::Fenetre { largeur, hauteur });
        }
        Ok(())
    }

    /// Configuration embarquée ; repli sur les valeurs par défaut si elle est invalide.
    pub fn charger() -> Self {
        Self::depuis_toml(CONFIG_EMBARQUEE).unwrap_or_else(|err| {
            warn!(%err, "configuration embarquée invalide, valeurs par défaut");
            Self::default()
        })
    }
}
