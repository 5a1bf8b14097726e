//! # Customizer Commands
//!
//! The chair picker: material, swatches, arms, legs.
//!
//! | Field    | Values                                   |
//! |----------|------------------------------------------|
//! | material | leather, fabric (resets the cushion)     |
//! | cushion  | a swatch of the current material         |
//! | arms     | Fixed, 4D                                |
//! | armcolor | a swatch of the arm palette              |
//! | piping   | a swatch of the piping palette           |
//! | legs     | steel, black, gold                       |

use atelier_core::customizer::{cushion_palette, ARM_PALETTE, PIPING_PALETTE};
use atelier_core::{ArmStyle, ChairCustomizer, ChairOptions, Choice, LegsFinish, Material, Money};
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::CustomizerState;

/// Picker state plus what the price tag shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizerResponse {
    pub customizer: ChairCustomizer,
    pub options: ChairOptions,
    pub price: Money,
}

impl From<&ChairCustomizer> for CustomizerResponse {
    fn from(customizer: &ChairCustomizer) -> Self {
        CustomizerResponse {
            customizer: customizer.clone(),
            options: customizer.options(),
            price: customizer.price(),
        }
    }
}

pub fn get_customizer(customizer: &CustomizerState) -> CustomizerResponse {
    debug!("get_customizer command");
    customizer.with_customizer(|c| CustomizerResponse::from(c))
}

/// Changes one picker field.
///
/// Enum values match case-insensitively; swatches must come from the
/// field's palette.
///
/// ## Errors
/// * `NotFound` - unknown field
/// * `ValidationError` - value not allowed for the field
pub fn customize(
    customizer: &CustomizerState,
    field: &str,
    value: &str,
) -> ApiResult<CustomizerResponse> {
    debug!(field = %field, value = %value, "customize command");

    customizer.with_customizer_mut(|c| {
        match field.to_ascii_lowercase().as_str() {
            "material" => c.set_material(choice::<Material>(field, value)?),
            "arms" | "armstyle" => c.set_arm_style(choice::<ArmStyle>(field, value)?),
            "legs" | "legsfinish" => c.set_legs_finish(choice::<LegsFinish>(field, value)?),
            "cushion" | "cushioncolor" => {
                if !c.set_cushion_color(value) {
                    return Err(not_in_palette(field, value, cushion_palette(c.material())));
                }
            }
            "armcolor" => {
                if !c.set_arm_color(value) {
                    return Err(not_in_palette(field, value, &ARM_PALETTE));
                }
            }
            "piping" | "pipingcolor" => {
                if !c.set_piping_color(value) {
                    return Err(not_in_palette(field, value, &PIPING_PALETTE));
                }
            }
            _ => return Err(ApiError::not_found("Customizer field", field)),
        }
        Ok(CustomizerResponse::from(&*c))
    })
}

fn choice<T: Choice>(field: &str, value: &str) -> ApiResult<T> {
    let value = value.trim();
    T::ALL
        .iter()
        .copied()
        .find(|c| c.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| {
            let allowed: Vec<_> = T::ALL.iter().map(|c| c.as_str()).collect();
            ApiError::validation(format!(
                "'{}' is not a {} (one of: {})",
                value,
                field,
                allowed.join(", ")
            ))
        })
}

fn not_in_palette(field: &str, value: &str, palette: &[&str]) -> ApiError {
    ApiError::validation(format!(
        "'{}' is not a {} swatch (one of: {})",
        value,
        field,
        palette.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use atelier_core::customizer::{FABRIC_PALETTE, LEATHER_PALETTE};

    #[test]
    fn test_default_chair() {
        let state = CustomizerState::new();
        let response = get_customizer(&state);
        assert_eq!(response.price.cents(), 47900);
        assert_eq!(response.options.material, Material::Leather);
        assert_eq!(response.options.cushion_color.as_deref(), Some(LEATHER_PALETTE[4]));
    }

    #[test]
    fn test_price_follows_options() {
        let state = CustomizerState::new();
        customize(&state, "legs", "Gold").unwrap();
        let response = customize(&state, "arms", "4d").unwrap();
        assert_eq!(response.options.arm_style, ArmStyle::FourD);
        assert_eq!(response.price.cents(), 58900);
    }

    #[test]
    fn test_material_switch_resets_cushion() {
        let state = CustomizerState::new();
        customize(&state, "cushion", LEATHER_PALETTE[0]).unwrap();
        let response = customize(&state, "material", "fabric").unwrap();
        assert_eq!(response.options.cushion_color.as_deref(), Some(FABRIC_PALETTE[2]));

        // A leather swatch is not a fabric swatch.
        let err = customize(&state, "cushion", LEATHER_PALETTE[0]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_rejections() {
        let state = CustomizerState::new();
        assert_eq!(customize(&state, "wheels", "yes").unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(
            customize(&state, "material", "velvet").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(
            customize(&state, "piping", "#123456").unwrap_err().code,
            ErrorCode::ValidationError
        );
        assert_eq!(get_customizer(&state), CustomizerResponse::from(&ChairCustomizer::default()));
    }

    #[test]
    fn test_arm_color_not_in_options() {
        let state = CustomizerState::new();
        let before = get_customizer(&state).options;
        let response = customize(&state, "armcolor", ARM_PALETTE[2]).unwrap();
        assert_eq!(response.customizer.arm_color(), ARM_PALETTE[2]);
        assert_eq!(response.options, before);
    }
}
