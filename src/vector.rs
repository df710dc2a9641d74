//////////////////////////////////////////////////////////////////////
// n-dimensional vector helpers on top of nalgebra's DVector.
//
// Mismatched lengths are programmer errors and panic.

use std::f64::EPSILON;

use crate::VecNd;

// all-zero vector
pub fn zero(dims: usize) -> VecNd {
    VecNd::zeros(dims)
}

// unit vector along axis i
pub fn elementary(dims: usize, i: usize) -> VecNd {
    let mut v = zero(dims);
    v[i] = 1.0;
    v
}

pub fn dot(v1: &VecNd, v2: &VecNd) -> f64 {
    assert_eq!(v1.len(), v2.len(), "dot: mismatched vector lengths");
    v1.dot(v2)
}

pub fn norm(v: &VecNd) -> f64 {
    dot(v, v).sqrt()
}

// scale v to unit length, or set it to zero if it is too short to
// normalize meaningfully
pub fn normalize(v: &mut VecNd) {
    let d = dot(v, v);
    if d > EPSILON {
        *v /= d.sqrt();
    } else {
        v.fill(0.0);
    }
}

// change v to have a norm of 1, BUT with the extra constraint
// that v[axis] = k (0 <= k <= 1).
//
// the remaining components keep their direction when they have any
// extent; otherwise they are spread evenly (negative) so the result
// is still a unit vector.
pub fn renormalize(v: &mut VecNd, axis: usize, k: f64) {

    let norm2 = (1.0 - k * k).max(0.0);

    let rest_norm2: f64 = v.iter().enumerate()
        .filter(|&(i, _)| i != axis)
        .map(|(_, x)| x * x)
        .sum();

    if rest_norm2 > EPSILON {
        *v *= (norm2 / rest_norm2).sqrt();
    } else {
        let x = (norm2 / (v.len() - 1) as f64).sqrt();
        v.fill(-x);
    }

    v[axis] = k;

}

// k1*v1 + k2*v2
pub fn combine(k1: f64, v1: &VecNd, k2: f64, v2: &VecNd) -> VecNd {
    assert_eq!(v1.len(), v2.len(), "combine: mismatched vector lengths");
    v1 * k1 + v2 * k2
}

// remove from v its component along the unit vector w
pub fn make_ortho(v: &VecNd, w: &VecNd) -> VecNd {
    v - w * dot(v, w)
}

// rotate v counterclockwise by theta in the plane of axes i and j
pub fn rotate(v: &mut VecNd, i: usize, j: usize, theta: f64) {
    let (s, c) = theta.sin_cos();
    let x = v[i];
    let y = v[j];
    v[i] = c * x - s * y;
    v[j] = s * x + c * y;
}

//////////////////////////////////////////////////////////////////////
