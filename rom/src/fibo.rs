//! Bring-up routines. Both work in the console's 16-bit `int` and wrap on
//! overflow, the same as the values that end up in the output buffer.

/// The `n`th Fibonacci number by double recursion.
///
/// Returns `n` unchanged for every `n <= 1`, negatives included. Exponential
/// time; this is a stress routine, not something to call per frame.
pub fn recursive_fibo(n: i16) -> i16 {
    if n <= 1 {
        n
    } else {
        recursive_fibo(n - 1).wrapping_add(recursive_fibo(n - 2))
    }
}

/// The `n`th Fibonacci number in a single forward pass.
///
/// Returns `-1` for negative `n`.
pub fn iterative_fibo(n: i16) -> i16 {
    if n < 0 {
        return -1;
    }

    let mut first: i16 = 0;
    let mut second: i16 = 1;
    let mut next: i16 = 0;
    for i in 0..=n {
        if i <= 1 {
            next = i;
        } else {
            next = first.wrapping_add(second);
            first = second;
            second = next;
        }
    }

    next
}
