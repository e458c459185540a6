use terrapulse_common::CoolingType;

/// Water usage effectiveness, liters per kWh, by cooling type.
pub fn wue_l_per_kwh(cooling: CoolingType) -> f64 {
    match cooling {
        CoolingType::Evaporative => 1.5,
        CoolingType::Hybrid => 0.7,
        CoolingType::Air => 0.05,
    }
}

/// The worst-case WUE across all supported cooling types.
pub fn max_wue() -> f64 {
    CoolingType::ALL
        .iter()
        .map(|c| wue_l_per_kwh(*c))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaporative_is_the_worst_case() {
        assert_eq!(max_wue(), wue_l_per_kwh(CoolingType::Evaporative));
    }

    #[test]
    fn table_is_strictly_ordered() {
        assert!(wue_l_per_kwh(CoolingType::Evaporative) > wue_l_per_kwh(CoolingType::Hybrid));
        assert!(wue_l_per_kwh(CoolingType::Hybrid) > wue_l_per_kwh(CoolingType::Air));
    }
}
