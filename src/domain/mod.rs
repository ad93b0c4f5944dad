// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务模型，包括：
/// - 领域模型（models）：富化载荷、提交记录和运行统计
///
/// 领域层不依赖于任何外部实现，
/// 体现了纯粹的业务逻辑和业务规则。
pub mod models;
