/// Average rounded half away from zero, zero when there is nothing to average.
pub fn rounded_mean<I: IntoIterator<Item = u32>>(values: I) -> u32 {
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), v| (sum + u64::from(v), count + 1));

    match count {
        0 => 0,
        n => (sum as f64 / n as f64).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean([40, 45]), 43);
        assert_eq!(rounded_mean([40, 41, 41]), 41);
        assert_eq!(rounded_mean([90, 80, 95, 99]), 91);
    }

    #[test]
    fn test_rounded_mean_single_value() {
        assert_eq!(rounded_mean([42]), 42);
    }

    #[test]
    fn test_rounded_mean_empty() {
        assert_eq!(rounded_mean(Vec::new()), 0);
    }
}
