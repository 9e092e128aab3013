use super::Oracle;

impl Oracle {
    /// Expected number of d6 rolls needed to cover `steps` squares, where any
    /// overshoot on the final roll still counts as arriving.
    pub fn expected_rolls(&mut self, steps: u32) -> f64 {
        let steps = steps as usize;
        if self.rolls.is_empty() {
            self.rolls.push(0.0);
        }
        while self.rolls.len() <= steps {
            let n = self.rolls.len();
            let previous: f64 = (1..=6)
                .map(|face| n.checked_sub(face).map_or(0.0, |i| self.rolls[i]))
                .sum();
            self.rolls.push((previous + 6.0) / 6.0);
        }
        self.rolls[steps]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: [f64; 13] = [
        0.0, 1.0, 1.166667, 1.361111, 1.587963, 1.852623, 2.161394, 2.521626, 2.775231, 3.043325,
        3.323694, 3.612982, 3.906375,
    ];

    #[test]
    fn small_distances_match_reference() {
        let mut oracle = Oracle::new();
        for (steps, expected) in REFERENCE.iter().enumerate() {
            let got = oracle.expected_rolls(steps as u32);
            assert!((got - expected).abs() < 1e-6, "e({steps}) = {got}");
        }
    }

    #[test]
    fn one_to_six_steps_follow_the_closed_form() {
        let mut oracle = Oracle::new();
        for n in 1..=6 {
            let closed = (7.0f64 / 6.0).powi(n - 1);
            assert!((oracle.expected_rolls(n as u32) - closed).abs() < 1e-12);
        }
    }

    #[test]
    fn long_distances_approach_two_sevenths_per_step() {
        let mut oracle = Oracle::new();
        let slope = oracle.expected_rolls(200) - oracle.expected_rolls(199);
        assert!((slope - 2.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn more_steps_always_take_more_rolls() {
        let mut oracle = Oracle::new();
        for steps in 0..200 {
            let (near, far) = (oracle.expected_rolls(steps), oracle.expected_rolls(steps + 1));
            assert!(far > near, "e({}) = {far} is not above e({steps}) = {near}", steps + 1);
        }
    }
}
