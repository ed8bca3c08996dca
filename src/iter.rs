use_prelude!();

/// Iterator over the values a [`Generator`] yields when resumed with `()`.
///
/// It stops at the first [`GeneratorState::Returned`], discarding the return
/// value, and never resumes the generator after that.
#[derive(Debug)]
pub
struct Iter<G> {
    generator: G,
    returned: bool,
}

impl<G> Iter<G> {
    pub(in crate)
    fn new (generator: G)
      -> Self
    {
        Self { generator, returned: false }
    }

    /// Gives the generator back.
    pub
    fn into_inner (self: Self)
      -> G
    {
        self.generator
    }
}

impl<G> Iterator for Iter<G>
where
    G : Generator<()> + Unpin,
{
    type Item = G::Yield;

    fn next (self: &'_ mut Self)
      -> Option<Self::Item>
    {
        if self.returned {
            return None;
        }
        match Pin::new(&mut self.generator).resume(()) {
            | GeneratorState::Yielded(x) => Some(x),
            | GeneratorState::Returned(_) => {
                self.returned = true;
                None
            },
        }
    }
}

impl<G> ::core::iter::FusedIterator for Iter<G>
where
    G : Generator<()> + Unpin,
{}
