// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Callable adapters.
//!
//! Everything a task can run goes through [`Callable`], keyed by the tuple
//! of bound arguments. Plain functions, function pointers, `&'static`
//! function references and closures get it for free through `FnOnce`.
//! Functor types implement it directly. [`Bound`] pairs a shared object
//! with one of its `&self` methods, [`BoundMut`] an owned object with a
//! `&mut self` method.

use std::ops::{Deref, DerefMut};

/// Something that can be invoked once with a tuple of arguments.
pub trait Callable<Args> {
    type Output;

    fn call(self, args: Args) -> Self::Output;
}

/// An object pointer paired with a method taking `&Target` as its receiver.
///
/// `P` is any shared pointer (`Arc<C>`, `&'static C`, `Box<C>`), so the
/// object may be observed by the caller while the task runs.
#[derive(Debug, Clone)]
pub struct Bound<P, M> {
    object: P,
    method: M,
}

impl<P, M> Bound<P, M> {
    pub fn new(object: P, method: M) -> Self {
        Self { object, method }
    }
}

/// An owning object pointer paired with a method taking `&mut Target`.
///
/// `P` is usually `Box<C>`: the task gets sole access to the object and
/// may mutate it. The caller gives the object up at launch.
#[derive(Debug, Clone)]
pub struct BoundMut<P, M> {
    object: P,
    method: M,
}

impl<P, M> BoundMut<P, M> {
    pub fn new(object: P, method: M) -> Self {
        Self { object, method }
    }
}

/// A callable together with its bound arguments, invocable without any
/// further input. This is what moves onto the worker thread.
pub struct Adapter<F, Args> {
    callable: F,
    args: Args,
}

impl<F, Args> Adapter<F, Args>
where
    F: Callable<Args>,
{
    pub fn new(callable: F, args: Args) -> Self {
        Self { callable, args }
    }

    pub fn invoke(self) -> F::Output {
        self.callable.call(self.args)
    }
}

macro_rules! impl_callable {
    ($($ty:ident $val:ident),*) => {
        impl<F, R, $($ty,)*> Callable<($($ty,)*)> for F
        where
            F: FnOnce($($ty),*) -> R,
        {
            type Output = R;

            fn call(self, ($($val,)*): ($($ty,)*)) -> R {
                self($($val),*)
            }
        }

        impl<P, M, R, $($ty,)*> Callable<($($ty,)*)> for Bound<P, M>
        where
            P: Deref,
            M: FnOnce(&P::Target, $($ty),*) -> R,
        {
            type Output = R;

            fn call(self, ($($val,)*): ($($ty,)*)) -> R {
                (self.method)(&*self.object, $($val),*)
            }
        }

        impl<P, M, R, $($ty,)*> Callable<($($ty,)*)> for BoundMut<P, M>
        where
            P: DerefMut,
            M: FnOnce(&mut P::Target, $($ty),*) -> R,
        {
            type Output = R;

            fn call(self, ($($val,)*): ($($ty,)*)) -> R {
                let BoundMut { mut object, method } = self;
                method(&mut *object, $($val),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A0 a0);
impl_callable!(A0 a0, A1 a1);
impl_callable!(A0 a0, A1 a1, A2 a2);
impl_callable!(A0 a0, A1 a1, A2 a2, A3 a3);
impl_callable!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4);
impl_callable!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_callable!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_callable!(A0 a0, A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn square(x: i32) -> i32 {
        x * x
    }

    fn answer() -> i32 {
        42
    }

    fn sum8(a: u8, b: u16, c: u32, d: u64, e: i8, f: i16, g: i32, h: i64) -> i64 {
        a as i64 + b as i64 + c as i64 + d as i64 + e as i64 + f as i64 + g as i64 + h
    }

    static SQUARE: fn(i32) -> i32 = square;

    struct Scale {
        factor: i32,
    }

    impl Callable<(i32,)> for Scale {
        type Output = i32;

        fn call(self, (x,): (i32,)) -> i32 {
            x * self.factor
        }
    }

    struct Counter {
        i: i32,
        j: i32,
    }

    impl Counter {
        fn total(&self) -> i32 {
            self.i + self.j
        }

        fn weighted(&self, k: i32, label: &'static str) -> String {
            format!("{}={}", label, (self.i + self.j) * k)
        }

        fn increment(&mut self, k: i32) -> i32 {
            self.i += k;
            self.i + self.j
        }

        fn reset(&mut self) -> i32 {
            std::mem::replace(&mut self.i, 0)
        }
    }

    #[test]
    fn nullary_function() {
        assert_eq!(Adapter::new(answer, ()).invoke(), 42);
    }

    #[test]
    fn function_item_and_pointer() {
        assert_eq!(Adapter::new(square, (5,)).invoke(), 25);
        let ptr: fn(i32) -> i32 = square;
        assert_eq!(Adapter::new(ptr, (6,)).invoke(), 36);
    }

    #[test]
    fn function_reference() {
        assert_eq!(Adapter::new(&SQUARE, (7,)).invoke(), 49);
    }

    #[test]
    fn closure_captures_by_value() {
        let offset = 10;
        let f = move |x: i32, y: i32| x + y + offset;
        assert_eq!(Adapter::new(f, (1, 2)).invoke(), 13);
    }

    #[test]
    fn functor() {
        assert_eq!(Adapter::new(Scale { factor: 3 }, (4,)).invoke(), 12);
    }

    #[test]
    fn eight_arguments_of_distinct_types() {
        let adapter = Adapter::new(sum8, (1u8, 2u16, 3u32, 4u64, -5i8, 6i16, 7i32, 8i64));
        assert_eq!(adapter.invoke(), 26);
    }

    #[test]
    fn bound_method_nullary() {
        let counter = Arc::new(Counter { i: 4, j: 5 });
        let bound = Bound::new(counter, Counter::total);
        assert_eq!(Adapter::new(bound, ()).invoke(), 9);
    }

    #[test]
    fn bound_method_with_arguments() {
        let counter = Arc::new(Counter { i: 1, j: 2 });
        let bound = Bound::new(counter.clone(), Counter::weighted);
        assert_eq!(Adapter::new(bound, (3, "w")).invoke(), "w=9");
        // Caller keeps its own reference to the object.
        assert_eq!(counter.total(), 3);
    }

    #[test]
    fn bound_mut_method_mutates_object() {
        let bound = BoundMut::new(Box::new(Counter { i: 1, j: 2 }), Counter::increment);
        assert_eq!(Adapter::new(bound, (3,)).invoke(), 6);
    }

    #[test]
    fn bound_mut_method_nullary() {
        let bound = BoundMut::new(Box::new(Counter { i: 7, j: 0 }), Counter::reset);
        assert_eq!(Adapter::new(bound, ()).invoke(), 7);
    }

    #[test]
    fn bound_closure_receiver() {
        let bound = Bound::new(Box::new(vec![1, 2, 3]), |v: &Vec<i32>, extra: i32| {
            v.iter().sum::<i32>() + extra
        });
        assert_eq!(Adapter::new(bound, (4,)).invoke(), 10);
    }
}
