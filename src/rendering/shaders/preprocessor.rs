/// A build hook that may remove compiled variants of a shader before they are
/// written to the build.
pub trait ShaderPreprocessor<V> {
    /// Hooks with a lower order run first
    fn callback_order(&self) -> i32;

    fn on_process_shader(&self, shader_name: &str, variants: &mut Vec<V>);
}

/// Ordered set of preprocessors, run for every shader the build compiles
pub struct PreprocessorChain<'a, V> {
    hooks: Vec<Box<dyn ShaderPreprocessor<V> + 'a>>,
}

impl<'a, V> PreprocessorChain<'a, V> {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Add a hook. Hooks sharing an order run in registration order.
    pub fn register<H: ShaderPreprocessor<V> + 'a>(&mut self, hook: H) {
        self.hooks.push(Box::new(hook));
        self.hooks.sort_by_key(|hook| hook.callback_order());
    }

    pub fn process_shader(&self, shader_name: &str, variants: &mut Vec<V>) {
        for hook in &self.hooks {
            if variants.is_empty() {
                break;
            }
            hook.on_process_shader(shader_name, variants);
        }
    }

    pub fn callback_orders(&self) -> Vec<i32> {
        self.hooks.iter().map(|hook| hook.callback_order()).collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl<'a, V> Default for PreprocessorChain<'a, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder<'r> {
        order: i32,
        label: &'static str,
        log: &'r RefCell<Vec<(&'static str, usize)>>,
    }

    impl<'r> ShaderPreprocessor<u32> for Recorder<'r> {
        fn callback_order(&self) -> i32 {
            self.order
        }

        fn on_process_shader(&self, _shader_name: &str, variants: &mut Vec<u32>) {
            self.log.borrow_mut().push((self.label, variants.len()));
            variants.pop();
        }
    }

    #[test]
    fn test_hooks_run_by_callback_order() {
        let log = RefCell::new(Vec::new());
        let mut chain = PreprocessorChain::new();
        chain.register(Recorder { order: 5, label: "late", log: &log });
        chain.register(Recorder { order: -1, label: "early", log: &log });
        chain.register(Recorder { order: 5, label: "late-second", log: &log });
        chain.register(Recorder { order: 0, label: "first-party", log: &log });

        assert_eq!(chain.callback_orders(), vec![-1, 0, 5, 5]);

        let mut variants = vec![1, 2, 3, 4, 5];
        chain.process_shader("Any", &mut variants);

        assert_eq!(
            *log.borrow(),
            vec![("early", 5), ("first-party", 4), ("late", 3), ("late-second", 2)]
        );
        assert_eq!(variants, vec![1]);
    }

    #[test]
    fn test_empty_variant_list_skips_hooks() {
        let log = RefCell::new(Vec::new());
        let mut chain = PreprocessorChain::new();
        chain.register(Recorder { order: 0, label: "only", log: &log });

        let mut variants: Vec<u32> = Vec::new();
        chain.process_shader("Any", &mut variants);
        assert!(log.borrow().is_empty());
    }
}
