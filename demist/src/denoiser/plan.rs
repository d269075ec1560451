/// Schedule of one frame's à-trous iterations.
///
/// Iteration `i` reads ping-pong buffer `i % 2` (iteration 0 reads the
/// accumulation output instead) and writes buffer `(i + 1) % 2`, with the
/// sample spacing doubling each time; after `iterations` steps the final
/// result sits in buffer `iterations % 2`.
///
/// The feedback step is part of the schedule on purpose: history receives
/// the *intermediate* result of `feedback_iteration`, not the final, more
/// blurred one - feeding back the fully filtered image would trade ghosting
/// for over-smoothing under motion.
#[derive(Clone, Copy, Debug)]
pub struct FilterPlan {
    iterations: u32,
    feedback_iteration: u32,
    blur_as_input: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterStep {
    pub iteration: u32,

    /// Sample spacing of this iteration, `2^iteration`.
    pub step_size: i32,

    /// This iteration reads the accumulation output, not a ping-pong buffer.
    pub reads_accumulation: bool,

    /// Ping-pong buffer read by this iteration; meaningless when
    /// [`Self::reads_accumulation`] is set.
    pub read: usize,

    /// Ping-pong buffer written by this iteration.
    pub write: usize,

    /// Copy this iteration's output into the history surface afterwards.
    pub feedback: bool,
}

impl FilterPlan {
    pub fn new(
        iterations: u32,
        feedback_iteration: u32,
        blur_as_input: bool,
    ) -> Self {
        Self {
            iterations,
            feedback_iteration,
            blur_as_input,
        }
    }

    pub fn steps(&self) -> impl Iterator<Item = FilterStep> + '_ {
        (0..self.iterations).map(|iteration| FilterStep {
            iteration,
            step_size: 1 << iteration,
            reads_accumulation: iteration == 0,
            read: (iteration % 2) as usize,
            write: ((iteration + 1) % 2) as usize,
            feedback: self.blur_as_input
                && iteration == self.feedback_iteration,
        })
    }

    /// Ping-pong buffer holding the final filtered result.
    pub fn output_index(&self) -> usize {
        (self.iterations % 2) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_pong_alternates() {
        let plan = FilterPlan::new(4, 1, false);
        let steps: Vec<_> = plan.steps().collect();

        assert_eq!(4, steps.len());

        for (idx, step) in steps.iter().enumerate() {
            assert_eq!(idx as u32, step.iteration);
            assert_eq!(1 << idx, step.step_size);
            assert_eq!(idx == 0, step.reads_accumulation);
            assert_eq!(idx % 2, step.read);
            assert_eq!((idx + 1) % 2, step.write);
        }
    }

    #[test]
    fn output_comes_from_the_last_written_buffer() {
        for iterations in 1..=5 {
            let plan = FilterPlan::new(iterations, 0, false);
            let last = plan.steps().last().unwrap();

            assert_eq!(last.write, plan.output_index());
        }
    }

    #[test]
    fn feedback_fires_on_the_intermediate_iteration() {
        let plan = FilterPlan::new(3, 1, true);
        let steps: Vec<_> = plan.steps().collect();

        assert!(!steps[0].feedback);
        assert!(steps[1].feedback);
        assert!(!steps[2].feedback);

        // history receives iteration 1's output, which is *not* the buffer
        // the final result ends up in
        assert_eq!(0, steps[1].write);
        assert_eq!(1, plan.output_index());
    }

    #[test]
    fn feedback_requires_blur_as_input() {
        let plan = FilterPlan::new(3, 1, false);

        assert!(plan.steps().all(|step| !step.feedback));
    }

    #[test]
    fn feedback_past_the_last_iteration_never_fires() {
        let plan = FilterPlan::new(2, 5, true);

        assert!(plan.steps().all(|step| !step.feedback));
    }
}
