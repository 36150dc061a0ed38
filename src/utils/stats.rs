/// Weighted mean of samples ordered newest first, the i-th sample weighing `1/(i+1)`.
pub fn decayed_weighted_average(samples: &[u32]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let (weighted_sum, weight_total) = samples.iter().enumerate().fold(
        (0.0_f64, 0.0_f64),
        |(sum, total), (index, sample)| {
            let weight = 1.0 / (index as f64 + 1.0);
            (sum + f64::from(*sample) * weight, total + weight)
        },
    );

    Some(weighted_sum / weight_total)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values
        .iter()
        .map(|value| (value - avg).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}

/// Rounds half away from zero; negatives and NaN become 0.
pub fn round_to_u32(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    if value >= f64::from(u32::MAX) {
        return u32::MAX;
    }
    value.round() as u32
}

/// `assigned / available * 100`, rounded. A zero denominator is treated as one minute.
pub fn utilization_percent(assigned_minutes: u32, available_minutes: u32) -> u32 {
    if assigned_minutes == 0 {
        return 0;
    }
    let available = available_minutes.max(1);
    round_to_u32(f64::from(assigned_minutes) / f64::from(available) * 100.0)
}
