//! Compile-time switch between serial iteration and `rayon`.
//!
//! Crates in this workspace iterate through the `maybe_*` methods below.
//! With the `multithreaded` feature enabled they resolve to rayon's
//! parallel iterators; without it they resolve to the plain std ones, and
//! rayon is not linked at all.

#[cfg(feature = "multithreaded")]
mod imp {
    pub use rayon::{
        iter::{
            IntoParallelIterator, IntoParallelRefIterator, IntoParallelRefMutIterator,
            ParallelIterator,
        },
        join,
        slice::{ChunksMut, ParallelSliceMut},
    };

    pub trait MaybeParallelExt: IntoParallelIterator {
        fn maybe_into_par_iter(self) -> <Self as IntoParallelIterator>::Iter
        where
            Self: Sized,
        {
            self.into_par_iter()
        }
    }

    pub trait MaybeParallelRefExt: for<'a> IntoParallelRefIterator<'a> {
        fn maybe_par_iter(&self) -> <Self as IntoParallelRefIterator<'_>>::Iter {
            self.par_iter()
        }
    }

    pub trait MaybeParallelRefMutExt: for<'a> IntoParallelRefMutIterator<'a> {
        fn maybe_par_iter_mut(&mut self) -> <Self as IntoParallelRefMutIterator<'_>>::Iter {
            self.par_iter_mut()
        }
    }

    pub trait MaybeParallelSliceMut<T: Send>: ParallelSliceMut<T> {
        fn maybe_par_chunks_mut(&mut self, chunk_size: usize) -> ChunksMut<'_, T> {
            self.par_chunks_mut(chunk_size)
        }
    }

    impl<T: IntoParallelIterator> MaybeParallelExt for T {}
    impl<T: for<'a> IntoParallelRefIterator<'a>> MaybeParallelRefExt for T {}
    impl<T: for<'a> IntoParallelRefMutIterator<'a>> MaybeParallelRefMutExt for T {}
    impl<T: Send, S: ?Sized + ParallelSliceMut<T>> MaybeParallelSliceMut<T> for S {}
}

#[cfg(not(feature = "multithreaded"))]
mod imp {
    pub use std::slice::ChunksMut;

    /// Serial stand-in for `rayon::join`: runs both closures on the
    /// current thread, left first.
    #[inline]
    pub fn join<A, B, RA, RB>(oper_a: A, oper_b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        (oper_a(), oper_b())
    }

    pub trait MaybeParallelExt: IntoIterator {
        fn maybe_into_par_iter(self) -> <Self as IntoIterator>::IntoIter
        where
            Self: Sized,
        {
            self.into_iter()
        }
    }

    pub trait MaybeParallelRefExt {
        type Item;
        type Iter<'a>: Iterator<Item = &'a Self::Item>
        where
            Self: 'a;
        fn maybe_par_iter(&self) -> Self::Iter<'_>;
    }

    pub trait MaybeParallelRefMutExt {
        type Item;
        type Iter<'a>: Iterator<Item = &'a mut Self::Item>
        where
            Self: 'a;
        fn maybe_par_iter_mut(&mut self) -> Self::Iter<'_>;
    }

    pub trait MaybeParallelSliceMut<T> {
        fn maybe_par_chunks_mut(&mut self, chunk_size: usize) -> ChunksMut<'_, T>;
    }

    impl<T: IntoIterator> MaybeParallelExt for T {}

    impl<T: IntoIterator> MaybeParallelRefExt for T
    where
        for<'a> &'a T: IntoIterator<Item = &'a <T as IntoIterator>::Item>,
    {
        type Item = <T as IntoIterator>::Item;
        type Iter<'a>
            = <&'a T as IntoIterator>::IntoIter
        where
            Self: 'a;

        fn maybe_par_iter(&self) -> Self::Iter<'_> {
            self.into_iter()
        }
    }

    impl<T: IntoIterator> MaybeParallelRefMutExt for T
    where
        for<'a> &'a mut T: IntoIterator<Item = &'a mut <T as IntoIterator>::Item>,
    {
        type Item = <T as IntoIterator>::Item;
        type Iter<'a>
            = <&'a mut T as IntoIterator>::IntoIter
        where
            Self: 'a;

        fn maybe_par_iter_mut(&mut self) -> Self::Iter<'_> {
            self.into_iter()
        }
    }

    impl<T: Send> MaybeParallelSliceMut<T> for [T] {
        fn maybe_par_chunks_mut(&mut self, chunk_size: usize) -> ChunksMut<'_, T> {
            self.chunks_mut(chunk_size)
        }
    }
}

pub use imp::*;

pub mod prelude {
    #[cfg(feature = "multithreaded")]
    pub use rayon::prelude::*;

    pub use crate::{MaybeParallelRefExt, MaybeParallelRefMutExt, *};
}
