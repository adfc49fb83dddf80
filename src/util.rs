pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation (divides by n, not n-1).
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;

    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;

            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}
