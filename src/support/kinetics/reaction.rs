use crate::support::thermo::model::{ThermallyPerfectGas, thermally_perfect::STANDARD_PRESSURE};
use crate::support::units::MOLAR_GAS_CONSTANT;

use super::{ArrheniusRate, Equation, Participant};

/// Largest magnitude allowed for `ln Kc` before exponentiation.
const LN_KC_LIMIT: f64 = 700.0;

/// How the backward rate coefficient of a reaction is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackwardRate {
    /// `kb = kf / Kc`, with `Kc` from the species Gibbs energies.
    FromEquilibrium,
    /// An explicit Arrhenius fit.
    Explicit(ArrheniusRate),
    /// No backward reaction.
    Irreversible,
}

/// One elementary reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    label: String,
    equation: Equation,
    forward: ArrheniusRate,
    backward: BackwardRate,
    efficiencies: Option<Vec<f64>>,
}

impl Reaction {
    /// Assembles a reaction from parsed parts.
    ///
    /// `efficiencies` holds one third-body efficiency per species and is
    /// only used when the equation has a third body `M`.
    pub(crate) fn new(
        label: String,
        equation: Equation,
        forward: ArrheniusRate,
        backward: BackwardRate,
        efficiencies: Option<Vec<f64>>,
    ) -> Self {
        Self {
            label,
            equation,
            forward,
            backward,
            efficiencies,
        }
    }

    /// Whether every species index, and the efficiency list if any, fits a
    /// mechanism of `n_species` species.
    pub(crate) fn fits(&self, n_species: usize) -> bool {
        let mut participants = self.equation.reactants.iter().chain(&self.equation.products);
        participants.all(|p| p.species < n_species)
            && self
                .efficiencies
                .as_ref()
                .is_none_or(|eff| eff.len() == n_species)
    }

    /// The equation text as written in the mechanism.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn equation(&self) -> &Equation {
        &self.equation
    }

    #[must_use]
    pub fn forward(&self) -> &ArrheniusRate {
        &self.forward
    }

    #[must_use]
    pub fn backward(&self) -> &BackwardRate {
        &self.backward
    }

    /// Equilibrium constant in concentration units, `Kc = Kp·(p°/(Ru·T))^Δν`.
    ///
    /// `Kp = exp(−Σ ν_i·g°_i/(Ru·T))` with products counted positive.
    #[must_use]
    pub fn equilibrium_constant(&self, gas: &ThermallyPerfectGas, t: f64) -> f64 {
        self.ln_equilibrium_constant(gas, t).exp()
    }

    fn ln_equilibrium_constant(&self, gas: &ThermallyPerfectGas, t: f64) -> f64 {
        let g = |side: &[Participant]| {
            side.iter()
                .map(|p| f64::from(p.coefficient) * gas.g_rt(p.species, t))
                .sum::<f64>()
        };
        let ln_kp = g(&self.equation.reactants) - g(&self.equation.products);
        let dnu = f64::from(self.equation.delta_nu());
        ln_kp + dnu * (STANDARD_PRESSURE / (MOLAR_GAS_CONSTANT * t)).ln()
    }

    /// Forward and backward rate coefficients at temperature `t`.
    #[must_use]
    pub fn rate_constants(&self, gas: &ThermallyPerfectGas, t: f64) -> (f64, f64) {
        let kf = self.forward.eval(t);
        let kb = match (&self.backward, self.equation.reversible) {
            (_, false) | (BackwardRate::Irreversible, _) => 0.0,
            (BackwardRate::Explicit(rate), true) => rate.eval(t),
            (BackwardRate::FromEquilibrium, true) => {
                let ln_kc = self
                    .ln_equilibrium_constant(gas, t)
                    .clamp(-LN_KC_LIMIT, LN_KC_LIMIT);
                kf * (-ln_kc).exp()
            }
        };
        (kf, kb)
    }

    /// Effective third-body concentration `[M] = Σ eff_i·c_i`, or 1 without `M`.
    fn third_body_concentration(&self, conc: &[f64]) -> f64 {
        if !self.equation.third_body {
            return 1.0;
        }
        match &self.efficiencies {
            Some(eff) => eff.iter().zip(conc).map(|(e, c)| e * c).sum(),
            None => conc.iter().sum(),
        }
    }

    /// Forward and backward progress rates in mol/(m³·s).
    #[must_use]
    pub fn progress_rates(&self, kf: f64, kb: f64, conc: &[f64]) -> (f64, f64) {
        let product = |side: &[Participant]| {
            side.iter()
                .map(|p| conc[p.species].max(0.0).powi(p.coefficient as i32))
                .product::<f64>()
        };
        let m = self.third_body_concentration(conc);
        let wf = kf * product(&self.equation.reactants) * m;
        let wb = if kb == 0.0 {
            0.0
        } else {
            kb * product(&self.equation.products) * m
        };
        (wf, wb)
    }

    /// Adds this reaction's contributions to the production and loss vectors.
    pub(crate) fn accumulate(&self, kf: f64, kb: f64, conc: &[f64], q: &mut [f64], l: &mut [f64]) {
        let (wf, wb) = self.progress_rates(kf, kb, conc);
        for p in &self.equation.reactants {
            let nu = f64::from(p.coefficient);
            l[p.species] += nu * wf;
            q[p.species] += nu * wb;
        }
        for p in &self.equation.products {
            let nu = f64::from(p.coefficient);
            q[p.species] += nu * wf;
            l[p.species] += nu * wb;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{
        kinetics::parse_equation,
        thermo::model::thermally_perfect::test_data::{atomic_nitrogen, nitrogen},
    };

    fn gas() -> ThermallyPerfectGas {
        ThermallyPerfectGas::new(vec![nitrogen(), atomic_nitrogen()]).unwrap()
    }

    fn dissociation(backward: BackwardRate) -> Reaction {
        let equation = parse_equation("N2 + N2 <=> N + N + N2", &["N2", "N"]).unwrap();
        Reaction::new(
            "N2 + N2 <=> N + N + N2".to_string(),
            equation,
            ArrheniusRate::new(7.0e15, -1.6, 113_200.0).unwrap(),
            backward,
            None,
        )
    }

    #[test]
    fn nitrogen_dissociation_equilibrium_is_small_at_four_thousand_kelvin() {
        let gas = gas();
        let kc = dissociation(BackwardRate::FromEquilibrium).equilibrium_constant(&gas, 4000.0);
        // ln Kp ≈ −ΔH/(Ru·T) + ΔS/Ru with ΔH ≈ 960 kJ/mol.
        assert!(kc > 1e-8 && kc < 1e-4, "Kc = {kc}");
    }

    #[test]
    fn rates_balance_at_equilibrium() {
        let gas = gas();
        let reaction = dissociation(BackwardRate::FromEquilibrium);
        let t = 5000.0;
        let (kf, kb) = reaction.rate_constants(&gas, t);
        let kc = reaction.equilibrium_constant(&gas, t);
        assert_relative_eq!(kf / kb, kc, max_relative = 1e-10);

        // Choose [N]² / [N2] = Kc so that forward and backward rates cancel.
        let c_n2 = 2.0;
        let c_n = (kc * c_n2).sqrt();
        let (wf, wb) = reaction.progress_rates(kf, kb, &[c_n2, c_n]);
        assert_relative_eq!(wf, wb, max_relative = 1e-10);
    }

    #[test]
    fn production_minus_loss_conserves_mass() {
        let gas = gas();
        let reaction = dissociation(BackwardRate::FromEquilibrium);
        let (kf, kb) = reaction.rate_constants(&gas, 6000.0);

        let conc = [2.0, 1.0];
        let mut q = [0.0; 2];
        let mut l = [0.0; 2];
        reaction.accumulate(kf, kb, &conc, &mut q, &mut l);

        let m = [0.028_013_4, 0.014_006_7];
        let net_mass: f64 = (0..2).map(|i| (q[i] - l[i]) * m[i]).sum();
        let scale: f64 = (0..2).map(|i| q[i] * m[i]).sum();
        assert!(net_mass.abs() <= 1e-12 * scale);
    }

    #[test]
    fn irreversible_and_explicit_backward_rates() {
        let gas = gas();
        let (_, kb) = dissociation(BackwardRate::Irreversible).rate_constants(&gas, 4000.0);
        assert_eq!(kb, 0.0);

        let fixed = ArrheniusRate::new(1.0e3, 0.0, 0.0).unwrap();
        let (_, kb) = dissociation(BackwardRate::Explicit(fixed)).rate_constants(&gas, 4000.0);
        assert_relative_eq!(kb, 1.0e3);
    }

    #[test]
    fn third_body_uses_efficiencies() {
        let equation = parse_equation("N + N + M <=> N2 + M", &["N2", "N"]).unwrap();
        let reaction = Reaction::new(
            "N + N + M <=> N2 + M".to_string(),
            equation,
            ArrheniusRate::new(1.0, 0.0, 0.0).unwrap(),
            BackwardRate::Irreversible,
            Some(vec![1.0, 4.0]),
        );
        let (wf, _) = reaction.progress_rates(1.0, 0.0, &[2.0, 0.5]);
        // [N]²·[M] = 0.25 · (2 + 4·0.5)
        assert_relative_eq!(wf, 1.0);
    }
}
